// src/table.rs

//! Delimited-text table helpers.
//!
//! [`build_table`] is the utility boundary used by pipeline tasks to hand
//! tabular data to the next stage as a re-readable stream: it writes rows
//! into a caller-supplied writable, seekable stream, rewinds it to the
//! start, and returns it. [`parse_table`] reads such a table back.

use std::io::{self, Seek, Write};

/// Write `rows` (preceded by `header`, if given) as a comma-delimited table
/// into `out`, rewind `out` to its start, and return it.
///
/// Fields containing the delimiter, quotes or newlines are quoted, with
/// embedded quotes doubled.
pub fn build_table<W, R>(rows: R, header: Option<&[&str]>, mut out: W) -> io::Result<W>
where
    W: Write + Seek,
    R: IntoIterator<Item = Vec<String>>,
{
    if let Some(header) = header {
        write_row(&mut out, header.iter().copied())?;
    }
    for row in rows {
        write_row(&mut out, row.iter().map(|s| s.as_str()))?;
    }

    out.flush()?;
    out.rewind()?;
    Ok(out)
}

fn write_row<'a, W, I>(out: &mut W, fields: I) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a str>,
{
    let mut first = true;
    for field in fields {
        if !first {
            out.write_all(b",")?;
        }
        first = false;

        if field.contains(['"', ',', '\n', '\r']) {
            write!(out, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            out.write_all(field.as_bytes())?;
        }
    }
    out.write_all(b"\n")?;
    Ok(())
}

/// Parse a comma-delimited table produced by [`build_table`] back into rows.
///
/// Understands quoted fields (doubled quotes, embedded delimiters and
/// newlines) and both `\n` and `\r\n` record separators.
pub fn parse_table(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_started = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                row_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_started = true;
            }
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                row_started = false;
            }
            _ => {
                field.push(c);
                row_started = true;
            }
        }
    }

    // Final record without a trailing newline.
    if row_started || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
