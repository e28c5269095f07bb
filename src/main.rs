use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ferrous_wfa::{align_opt::AlignOpt, batch, decode_run_length, defaults, render_alignment};

#[derive(Parser)]
#[command(name = "ferrous-wfa")]
#[command(about = "FerrousWFA - gap-affine global pairwise alignment with the wavefront algorithm", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose level: 1=error, 2=warning, 3=message, 4=debug, 5+=trace
    #[arg(short = 'v', long, value_name = "INT", default_value_t = defaults::VERBOSITY, global = true)]
    verbosity: i32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align two sequences given on the command line
    Align {
        /// Sequence 1 (vertical)
        #[arg(value_name = "SEQ1")]
        seq1: String,

        /// Sequence 2 (horizontal)
        #[arg(value_name = "SEQ2")]
        seq2: String,

        /// Penalties as match,mismatch,gap-open,gap-extend
        #[arg(short = 'p', long, value_name = "M,X,O,E", default_value = defaults::PENALTIES)]
        penalties: String,

        /// Report the score only, skip edit-script reconstruction
        #[arg(long)]
        score_only: bool,

        /// Also print the three-line alignment view
        #[arg(long)]
        pretty: bool,
    },

    /// Align every pair in a sequences file ('>' / '<' line pairs)
    Batch {
        /// Sequences file
        #[arg(value_name = "SEQUENCES")]
        sequences: PathBuf,

        /// Solutions file to verify against (-score<TAB>edit_script per pair)
        #[arg(short = 's', long, value_name = "FILE")]
        solutions: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of threads (default: all cores)
        #[arg(short = 't', long, value_name = "INT")]
        threads: Option<usize>,

        /// Penalties as match,mismatch,gap-open,gap-extend
        #[arg(short = 'p', long, value_name = "M,X,O,E", default_value = defaults::PENALTIES)]
        penalties: String,

        /// Report scores only, skip edit-script reconstruction
        #[arg(long)]
        score_only: bool,

        /// Preallocate wavefronts from an estimated score
        #[arg(long)]
        preallocate: bool,

        /// Mismatch fraction assumed by --preallocate
        #[arg(long, value_name = "FLOAT", default_value_t = defaults::EXPECTED_DIVERGENCE)]
        divergence: f32,
    },

    /// Expand a run-length edit script (e.g. 3M1X into MMMX)
    Decode {
        #[arg(value_name = "ENCODED")]
        encoded: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Map verbosity (1=error, 2=warning, 3=message, 4=debug, 5+=trace)
    // to Rust log levels
    let log_level = match cli.verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace, // 5+ = trace
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None) // Don't show timestamps
        .format_target(false) // Don't show module names
        .init();

    match cli.command {
        Commands::Align {
            seq1,
            seq2,
            penalties,
            score_only,
            pretty,
        } => {
            let opt = AlignOpt {
                penalty: parse_penalties_or_exit(&penalties),
                edit_script: !score_only,
                ..AlignOpt::default()
            };

            let result = match ferrous_wfa::align_sequences(seq1.as_bytes(), seq2.as_bytes(), &opt) {
                Ok(result) => result,
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            };

            println!("{}\t{}", result.score, result.edit_script);

            if pretty && !score_only {
                match render_alignment(seq1.as_bytes(), seq2.as_bytes(), &result.edit_script) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(e) => {
                        log::error!("{}", e);
                        std::process::exit(1);
                    }
                }
            }
        }

        Commands::Batch {
            sequences,
            solutions,
            output,
            threads,
            penalties,
            score_only,
            preallocate,
            divergence,
        } => {
            let opt = AlignOpt {
                penalty: parse_penalties_or_exit(&penalties),
                edit_script: !score_only,
                preallocate,
                expected_divergence: divergence,
                threads,
            };

            configure_thread_pool(opt.threads);

            log::info!(
                "Penalties: match={}, mismatch={}, gap open={}, gap extend={}",
                opt.penalty.match_penalty,
                opt.penalty.mismatch,
                opt.penalty.gap_open,
                opt.penalty.gap_extend
            );

            match batch::main_batch(&sequences, solutions.as_deref(), output.as_deref(), &opt) {
                Ok(Some(report)) if !report.is_ok() => {
                    log::error!(
                        "{} of {} pairs failed verification",
                        report.failures.len(),
                        report.total()
                    );
                    std::process::exit(1);
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("{:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Decode { encoded } => {
            println!("{}", decode_run_length(&encoded));
        }
    }
}

fn parse_penalties_or_exit(s: &str) -> ferrous_wfa::Penalty {
    match AlignOpt::parse_penalties(s) {
        Ok(penalty) => penalty,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn configure_thread_pool(threads: Option<usize>) {
    // Default to number of CPU cores if not specified
    let mut num_threads = threads.unwrap_or_else(num_cpus::get);

    if num_threads < 1 {
        log::warn!("Invalid thread count {}, using 1 thread", num_threads);
        num_threads = 1;
    }

    // Reasonable upper bound to prevent accidental resource exhaustion
    let max_threads = num_cpus::get() * 2;
    if num_threads > max_threads {
        log::warn!(
            "Thread count {} exceeds recommended maximum {}, capping at {}",
            num_threads,
            max_threads,
            max_threads
        );
        num_threads = max_threads;
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        Ok(_) => {
            log::debug!(
                "Successfully built global Rayon thread pool with {} threads",
                num_threads
            );
        }
        Err(e) => {
            log::warn!(
                "Failed to configure thread pool: {} (may already be initialized)",
                e
            );
        }
    }

    let thread_word = if num_threads == 1 {
        "thread"
    } else {
        "threads"
    };
    log::info!("Using {} {}", num_threads, thread_word);
}
