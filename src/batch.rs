use anyhow::{Context, Result};
// src/batch.rs
//
// Batch alignment of a sequences file, with optional verification against a
// solutions file.

use crate::align::align_sequences;
use crate::align_opt::AlignOpt;
use crate::core::alignment::wfa::aligner::Alignment;
use crate::core::alignment::wfa::penalty::Penalty;
use crate::core::io::pairs::{read_pairs_file, read_solutions_file, SequencePair, Solution};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Align every pair in parallel. Results come back in input order, each
/// pair with its own wavefront context.
pub fn align_batch(pairs: &[SequencePair], opt: &AlignOpt) -> crate::error::Result<Vec<Alignment>> {
    pairs
        .par_iter()
        .map(|pair| align_sequences(&pair.sequence1, &pair.sequence2, opt))
        .collect()
}

/// Why one pair did not verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyFailure {
    pub index: usize,
    pub reason: String,
}

/// Outcome of [`verify_against`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Pairs whose score (and edit script, if checked) matched.
    pub verified: usize,
    /// Pairs with a different but equally scoring edit script.
    pub alternative: usize,
    pub failures: Vec<VerifyFailure>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.verified + self.alternative + self.failures.len()
    }
}

/// Compare `results` against `solutions`.
///
/// A score mismatch always fails. With `check_scripts`, a differing edit
/// script is still accepted when it consumes both sequences exactly and its
/// replayed score equals the expected one.
pub fn verify_against(
    pairs: &[SequencePair],
    results: &[Alignment],
    solutions: &[Solution],
    opt: &AlignOpt,
    check_scripts: bool,
) -> Result<VerifyReport> {
    if pairs.len() != results.len() || results.len() != solutions.len() {
        anyhow::bail!(
            "Pair/result/solution counts differ: {} pairs, {} results, {} solutions",
            pairs.len(),
            results.len(),
            solutions.len()
        );
    }

    let mut report = VerifyReport::default();
    for (index, ((pair, got), expected)) in pairs.iter().zip(results).zip(solutions).enumerate() {
        match verify_one(pair, got, expected, opt, check_scripts) {
            Ok(true) => report.verified += 1,
            Ok(false) => report.alternative += 1,
            Err(reason) => {
                log::warn!("Pair #{}: {}", index, reason);
                report.failures.push(VerifyFailure { index, reason });
            }
        }
    }
    Ok(report)
}

/// `Ok(true)` for an exact match, `Ok(false)` for an accepted alternative.
fn verify_one(
    pair: &SequencePair,
    got: &Alignment,
    expected: &Solution,
    opt: &AlignOpt,
    check_scripts: bool,
) -> std::result::Result<bool, String> {
    if got.score != expected.score {
        return Err(format!("score {} differs from expected {}", got.score, expected.score));
    }
    if !check_scripts || got.edit_script == expected.edit_script {
        return Ok(true);
    }

    // alignment scores never charge matches, so neither does the replay
    let replay_penalty = Penalty {
        match_penalty: 0,
        ..opt.penalty
    };
    let replayed = got.edit_script.score(&replay_penalty);
    if replayed != expected.score as u64 {
        return Err(format!(
            "edit script {} replays to {} (expected {}, wanted {})",
            got.edit_script, replayed, expected.score, expected.edit_script
        ));
    }
    got.edit_script
        .check_coverage(pair.sequence1.len(), pair.sequence2.len())
        .map_err(|e| e.to_string())?;
    Ok(false)
}

/// Write results in the solutions-file layout (`-score<TAB>edit_script`,
/// a zero score is written as `0`).
pub fn write_results<W: Write>(writer: &mut W, results: &[Alignment]) -> io::Result<()> {
    let mut line = String::new();
    for result in results {
        line.clear();
        result.edit_script.write_to_string(&mut line);
        writeln!(writer, "{}\t{}", -(result.score as i64), line)?;
    }
    Ok(())
}

/// Entry point for the `batch` sub-command. Returns the verification report
/// when a solutions file was given.
pub fn main_batch(
    sequences: &Path,
    solutions: Option<&Path>,
    output: Option<&Path>,
    opt: &AlignOpt,
) -> Result<Option<VerifyReport>> {
    let pairs = read_pairs_file(sequences)
        .with_context(|| format!("Error reading sequences file {}", sequences.display()))?;
    log::info!("Aligning {} pairs from {}", pairs.len(), sequences.display());

    let start = Instant::now();
    let results = align_batch(&pairs, opt).context("Error aligning sequence pairs")?;
    log::info!(
        "Aligned {} pairs in {:.3} s",
        results.len(),
        start.elapsed().as_secs_f64()
    );

    let mut writer: Box<dyn Write> = match output {
        Some(file_name) => Box::new(BufWriter::new(File::create(file_name).with_context(
            || format!("Error creating output file {}", file_name.display()),
        )?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write_results(&mut writer, &results).context("Error writing results")?;
    writer.flush().context("Error writing results")?;

    let Some(solutions_path) = solutions else {
        return Ok(None);
    };
    let expected = read_solutions_file(solutions_path)
        .with_context(|| format!("Error reading solutions file {}", solutions_path.display()))?;
    let report = verify_against(&pairs, &results, &expected, opt, opt.edit_script)?;
    log::info!(
        "Verified {}/{} pairs ({} alternative edit scripts, {} failures)",
        report.verified + report.alternative,
        report.total(),
        report.alternative,
        report.failures.len()
    );
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alignment::cigar::EditScript;

    fn solution(score: usize, script: &str) -> Solution {
        Solution {
            score,
            edit_script: script.parse().unwrap(),
        }
    }

    #[test]
    fn test_align_batch_keeps_input_order() {
        let pairs = vec![
            SequencePair::new(&b"ACGT"[..], &b"ACGT"[..]),
            SequencePair::new(&b"ACGT"[..], &b"ACCT"[..]),
            SequencePair::new(&b""[..], &b"AC"[..]),
        ];
        let results = align_batch(&pairs, &AlignOpt::default()).unwrap();
        let scores: Vec<usize> = results.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![0, 4, 10]);
        assert_eq!(results[1].cigar(), "2M1X1M");
    }

    #[test]
    fn test_verify_accepts_equivalent_script() {
        let opt = AlignOpt::default();
        let pairs = vec![SequencePair::new(&b"ACGT"[..], &b"ACGGT"[..])];
        let results = align_batch(&pairs, &opt).unwrap();
        assert_eq!(results[0].cigar(), "3M1I1M");

        // inserting the first G instead of the second also scores 8
        let report = verify_against(&pairs, &results, &[solution(8, "2M1I2M")], &opt, true).unwrap();
        assert_eq!(report.alternative, 1);
        assert!(report.is_ok());

        let report = verify_against(&pairs, &results, &[solution(8, "3M1I1M")], &opt, true).unwrap();
        assert_eq!(report.verified, 1);
    }

    #[test]
    fn test_verify_alternative_ignores_match_penalty() {
        let opt = AlignOpt::with_penalty(Penalty::new(1, 4, 6, 2));
        let pairs = vec![SequencePair::new(&b"ACGT"[..], &b"ACGGT"[..])];
        let results = align_batch(&pairs, &opt).unwrap();
        assert_eq!(results[0].score, 8);

        let report = verify_against(&pairs, &results, &[solution(8, "2M1I2M")], &opt, true).unwrap();
        assert!(report.is_ok(), "failures: {:?}", report.failures);
        assert_eq!(report.alternative, 1);
    }

    #[test]
    fn test_verify_rejects_score_mismatch() {
        let opt = AlignOpt::default();
        let pairs = vec![SequencePair::new(&b"ACGT"[..], &b"ACCT"[..])];
        let results = align_batch(&pairs, &opt).unwrap();
        let report = verify_against(&pairs, &results, &[solution(6, "2M1X1M")], &opt, true).unwrap();
        assert!(!report.is_ok());
        assert_eq!(report.failures[0].index, 0);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_verify_rejects_count_mismatch() {
        let opt = AlignOpt::default();
        assert!(verify_against(&[], &[], &[solution(0, "1M")], &opt, true).is_err());
    }

    #[test]
    fn test_write_results_layout() {
        let results = vec![
            Alignment {
                score: 4,
                edit_script: "3M1X3M".parse().unwrap(),
            },
            Alignment {
                score: 0,
                edit_script: EditScript::new(),
            },
        ];
        let mut out = Vec::new();
        write_results(&mut out, &results).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "-4\t3M1X3M\n0\t\n");
    }
}
