use srt_shift::{
    Direction, SubtitleError,
    formats::srt::parse_srt,
    shift::shift_document,
    transform,
};

const BOM: &str = "\u{feff}";

#[test]
fn forward_half_second() {
    let out = transform("1\n00:00:01,000 --> 00:00:02,000\nHello\n\n", 500, Direction::Forward).unwrap();
    assert_eq!(out, format!("{BOM}1\r\n00:00:01,500 --> 00:00:02,500\r\nHello"));
}

#[test]
fn backward_two_seconds_clamps_start() {
    let out = transform("1\n00:00:01,000 --> 00:00:02,000\nHello\n\n", 2000, Direction::Backward).unwrap();
    assert_eq!(out, format!("{BOM}1\r\n00:00:00,000 --> 00:00:00,500\r\nHello"));
}

#[test]
fn empty_input_is_bom_only() {
    assert_eq!(transform("", 500, Direction::Forward).unwrap(), BOM);
    assert_eq!(transform("\n\n\r\n", 500, Direction::Backward).unwrap(), BOM);
}

#[test]
fn out_of_order_indices_are_renumbered_in_file_order() {
    let input = "5\n00:00:05,000 --> 00:00:06,000\nFive\n\n2\n00:00:02,000 --> 00:00:03,000\nTwo\n";
    let out = transform(input, 0, Direction::Forward).unwrap();
    assert_eq!(
        out,
        format!(
            "{BOM}1\r\n00:00:05,000 --> 00:00:06,000\r\nFive\r\n\r\n2\r\n00:00:02,000 --> 00:00:03,000\r\nTwo\n"
        )
    );
}

#[test]
fn block_without_index_is_dropped() {
    let input = "intro\n00:00:01,000 --> 00:00:02,000\nNo index here\n\n1\n00:00:03,000 --> 00:00:04,000\nKept\n";
    let doc = parse_srt(input);
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.stats.skipped, 1);

    let out = transform(input, 100, Direction::Forward).unwrap();
    assert_eq!(out, format!("{BOM}1\r\n00:00:03,100 --> 00:00:04,100\r\nKept\n"));
}

#[test]
fn large_backward_shift_collapses_cues_to_zero() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:03,000 --> 00:00:04,000\nB";
    let out = transform(input, 60_000, Direction::Backward).unwrap();
    assert_eq!(
        out,
        format!(
            "{BOM}1\r\n00:00:00,000 --> 00:00:00,000\r\nA\r\n\r\n2\r\n00:00:00,000 --> 00:00:00,000\r\nB"
        )
    );
}

#[test]
fn windows_input_round_trips_with_bom() {
    let input = "\u{feff}1\r\n00:00:01,000 --> 00:00:02,000\r\nLine one\r\nLine two\r\n\r\n";
    let out = transform(input, 1, Direction::Forward).unwrap();
    assert_eq!(
        out,
        format!("{BOM}1\r\n00:00:01,001 --> 00:00:02,001\r\nLine one\nLine two")
    );
}

#[test]
fn malformed_timestamp_surfaces_at_shift_time() {
    let mut doc = parse_srt("1\n00:00:01,000 --> 00:00:02,000\nA");
    doc.cues[0].end = "00:00:02.000".to_string();

    let err = shift_document(doc, 10).unwrap_err();
    assert!(matches!(err, SubtitleError::MalformedTimestamp { ref value } if value == "00:00:02.000"));
}

#[test]
fn non_ascii_timing_digits_drop_the_block_not_the_file() {
    let input = "1\n\u{0661}\u{0662}:00:01,000 --> 00:00:02,000\nBad\n\n2\n00:00:03,000 --> 00:00:04,000\nGood";
    let out = transform(input, 500, Direction::Forward).unwrap();
    assert_eq!(out, format!("{BOM}1\r\n00:00:03,500 --> 00:00:04,500\r\nGood"));
}
