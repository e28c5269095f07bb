// Sequence-pair and solution readers
//
// Sequences file: two lines per pair, sequence1 prefixed with '>' and
// sequence2 with '<':
//
//   >GATTACA
//   <GATCACA
//
// Solutions file: one `score<TAB>edit_script` line per pair, with the score
// stored negated (`-4\t3M1X3M`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::alignment::cigar::EditScript;
use crate::error::{Result, WfaError};

const BUFFER_SIZE: usize = 1024 * 1024;

/// One alignment job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub sequence1: Vec<u8>,
    pub sequence2: Vec<u8>,
}

impl SequencePair {
    pub fn new(sequence1: impl Into<Vec<u8>>, sequence2: impl Into<Vec<u8>>) -> Self {
        Self {
            sequence1: sequence1.into(),
            sequence2: sequence2.into(),
        }
    }
}

/// Expected result for one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Penalty as a positive cost.
    pub score: usize,
    pub edit_script: EditScript,
}

/// Read all pairs from a sequences file.
pub fn read_pairs_file(path: impl AsRef<Path>) -> Result<Vec<SequencePair>> {
    let file = File::open(path.as_ref())?;
    read_pairs(BufReader::with_capacity(BUFFER_SIZE, file))
}

/// Read all pairs from `reader`. Blank lines between records are skipped;
/// a bare prefix is an empty sequence.
pub fn read_pairs<R: BufRead>(reader: R) -> Result<Vec<SequencePair>> {
    let mut pairs = Vec::new();
    let mut pending: Option<(usize, Vec<u8>)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let prefix = line.chars().next().unwrap_or_default();
        let seq = &line[prefix.len_utf8()..];
        match (prefix, pending.take()) {
            ('>', None) => pending = Some((line_no, seq.as_bytes().to_vec())),
            ('<', Some((_, sequence1))) => {
                pairs.push(SequencePair::new(sequence1, seq.as_bytes()));
            }
            ('>', Some((first, _))) => {
                return Err(WfaError::Parse {
                    line: line_no,
                    msg: format!("sequence1 at line {first} has no '<' partner"),
                });
            }
            ('<', None) => {
                return Err(WfaError::Parse {
                    line: line_no,
                    msg: "'<' line without a preceding '>' line".to_string(),
                });
            }
            _ => {
                return Err(WfaError::Parse {
                    line: line_no,
                    msg: format!("expected '>' or '<' prefix, found {prefix:?}"),
                });
            }
        }
    }

    if let Some((first, _)) = pending {
        return Err(WfaError::Parse {
            line: first,
            msg: "sequence1 has no '<' partner at end of file".to_string(),
        });
    }

    log::debug!("Read {} sequence pairs", pairs.len());
    Ok(pairs)
}

/// Read all solutions from a solutions file.
pub fn read_solutions_file(path: impl AsRef<Path>) -> Result<Vec<Solution>> {
    let file = File::open(path.as_ref())?;
    read_solutions(BufReader::with_capacity(BUFFER_SIZE, file))
}

/// Read `score<TAB>edit_script` lines from `reader`, skipping blank lines.
pub fn read_solutions<R: BufRead>(reader: R) -> Result<Vec<Solution>> {
    let mut solutions = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        solutions.push(parse_solution(line).map_err(|msg| WfaError::Parse { line: line_no, msg })?);
    }

    log::debug!("Read {} solutions", solutions.len());
    Ok(solutions)
}

fn parse_solution(line: &str) -> std::result::Result<Solution, String> {
    let (score, script) = line
        .split_once('\t')
        .ok_or_else(|| format!("expected score<TAB>edit_script, found {line:?}"))?;

    let negated: i64 = score
        .trim()
        .parse()
        .map_err(|_| format!("invalid score: {score:?}"))?;
    if negated > 0 {
        return Err(format!("score {negated} should be stored negated"));
    }

    let edit_script = script
        .trim()
        .parse::<EditScript>()
        .map_err(|e| e.to_string())?;

    Ok(Solution {
        score: negated.unsigned_abs() as usize,
        edit_script,
    })
}
