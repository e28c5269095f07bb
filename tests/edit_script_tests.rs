/// Edit-script parsing, decoding, scoring and rendering
use ferrous_wfa::{
    align, decode_run_length, render_alignment, score_edit_script, EditOp, EditScript, Penalty,
    WfaError,
};

#[test]
fn test_parse_and_display() {
    for s in ["", "1M", "12M3X5I2M", "4D", "1X1M1I1D"] {
        let script: EditScript = s.parse().unwrap();
        assert_eq!(script.to_string(), s, "Display should restore {:?}", s);
    }

    // adjacent runs of the same op merge, zero runs vanish
    let script: EditScript = "2M3M0X1I".parse().unwrap();
    assert_eq!(script.to_string(), "5M1I");
    assert_eq!(script.runs(), &[(EditOp::M, 5), (EditOp::I, 1)]);
}

#[test]
fn test_parse_rejects_malformed() {
    for s in ["M", "3M2", "3Q", "1M-1X", "99999999999M", "4294967295M1M"] {
        match s.parse::<EditScript>() {
            Err(WfaError::MalformedEditScript { script, .. }) => assert_eq!(script, s),
            other => panic!("{:?} should be malformed, got {:?}", s, other),
        }
    }
}

#[test]
fn test_decode_run_length() {
    assert_eq!(decode_run_length("3M1X2I"), "MMMXII");
    assert_eq!(decode_run_length("10M"), "MMMMMMMMMM");
    assert_eq!(decode_run_length(""), "");
    // a character without a count repeats zero times
    assert_eq!(decode_run_length("M2X"), "XX");
}

#[test]
fn test_sequence_lengths() {
    let script: EditScript = "3M1X2I4D".parse().unwrap();
    assert_eq!(script.len_sequence1(), 3 + 1 + 4);
    assert_eq!(script.len_sequence2(), 3 + 1 + 2);
    assert_eq!(script.count(EditOp::I), 2);
    assert!(script.check_coverage(8, 6).is_ok());
    assert!(matches!(
        script.check_coverage(8, 7),
        Err(WfaError::EditScriptMismatch {
            expected: (8, 7),
            actual: (8, 6)
        })
    ));
}

#[test]
fn test_score_edit_script() {
    let p = Penalty::new(0, 4, 6, 2);
    assert_eq!(score_edit_script("10M", &p), 0);
    assert_eq!(score_edit_script("3M1X3M", &p), 4);
    // one gap of three: open once, extend three times
    assert_eq!(score_edit_script("4M3I", &p), 6 + 3 * 2);
    // two separate gaps each pay the open cost
    assert_eq!(score_edit_script("1I1M1I", &p), 2 * (6 + 2));
    // an insertion followed by a deletion is two gaps
    assert_eq!(score_edit_script("1I1D", &p), 2 * (6 + 2));

    let with_match = Penalty::new(1, 4, 6, 2);
    assert_eq!(score_edit_script("5M", &with_match), 5);
    assert_eq!(
        "5M".parse::<EditScript>().unwrap().score(&with_match),
        score_edit_script("5M", &with_match)
    );
}

#[test]
fn test_render_aligned_pair() {
    let p = Penalty::new(0, 4, 6, 2);
    let result = align(b"GATTACA", b"GATCACA", &p, true);
    let rendered = render_alignment(b"GATTACA", b"GATCACA", &result.edit_script).unwrap();
    assert_eq!(rendered.to_string(), "GATTACA\n||| |||\nGATCACA");

    let result = align(b"AAAA", b"AAAACCC", &p, true);
    let rendered = render_alignment(b"AAAA", b"AAAACCC", &result.edit_script).unwrap();
    assert_eq!(rendered.sequence1, "AAAA---");
    assert_eq!(rendered.matches, "||||   ");
    assert_eq!(rendered.sequence2, "AAAACCC");

    let result = align(b"AAAACCC", b"AAAA", &p, true);
    let rendered = render_alignment(b"AAAACCC", b"AAAA", &result.edit_script).unwrap();
    assert_eq!(rendered.sequence1, "AAAACCC");
    assert_eq!(rendered.matches, "|||||||");
    assert_eq!(rendered.sequence2, "AAAA---");
}

#[test]
fn test_render_rejects_wrong_script() {
    let script: EditScript = "4M".parse().unwrap();
    assert!(render_alignment(b"ACGT", b"ACGTA", &script).is_err());
}
