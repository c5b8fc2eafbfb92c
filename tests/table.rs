use std::io::{Cursor, Read};

use hnpipe::table::{build_table, parse_table};

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn build_table_writes_header_and_rows_and_rewinds() {
    let out = build_table(
        rows(&[&["1", "alpha"], &["2", "beta"]]),
        Some(&["id", "name"]),
        Cursor::new(Vec::new()),
    )
    .unwrap();

    // The returned stream is already rewound; read without seeking.
    let mut out = out;
    let mut text = String::new();
    out.read_to_string(&mut text).unwrap();
    assert_eq!(text, "id,name\n1,alpha\n2,beta\n");
}

#[test]
fn build_table_without_header() {
    let mut out = build_table(rows(&[&["x"]]), None, Cursor::new(Vec::new())).unwrap();
    let mut text = String::new();
    out.read_to_string(&mut text).unwrap();
    assert_eq!(text, "x\n");
}

#[test]
fn fields_with_delimiters_and_quotes_round_trip() {
    let original = rows(&[
        &["1", "Hello, world"],
        &["2", "She said \"hi\""],
        &["3", "line\nbreak"],
        &["4", "plain"],
    ]);

    let mut out = build_table(original.clone(), Some(&["id", "title"]), Cursor::new(Vec::new()))
        .unwrap();
    let mut text = String::new();
    out.read_to_string(&mut text).unwrap();

    let parsed = parse_table(&text);
    assert_eq!(parsed[0], vec!["id".to_string(), "title".to_string()]);
    assert_eq!(&parsed[1..], original.as_slice());
}

#[test]
fn parse_table_handles_crlf_and_missing_trailing_newline() {
    let parsed = parse_table("a,b\r\nc,d");
    assert_eq!(parsed, vec![
        vec!["a".to_string(), "b".to_string()],
        vec!["c".to_string(), "d".to_string()],
    ]);
}

#[test]
fn parse_table_of_empty_input_is_empty() {
    assert!(parse_table("").is_empty());
}
