// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Where parsing gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line where the offending field started.
    pub line: usize,
    pub reason: &'static str,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Minimal RFC-4180 style parser (quotes + CRLF tolerant, quoted newlines).
/// A quote only opens a quoted field at the start of the field; anywhere
/// else it is a literal character. Blank lines are skipped. An unterminated
/// quote is an error.
pub fn parse_rows(text: &str, sep: char) -> Result<Vec<Vec<String>>, ParseError> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;
    let mut quoted = false; // current row had a quoted field
    let mut field_quoted = false; // current field opened with a quote
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else if field.is_empty() && !field_quoted {
                    in_quotes = true;
                    field_quoted = true;
                    quoted = true;
                    quote_line = line;
                } else {
                    field.push('"'); // stray quote inside a bare field
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
                field_quoted = false;
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                line += 1;
                row.push(take(&mut field));
                field_quoted = false;
                flush_row(&mut rows, &mut row, take(&mut quoted));
            }
            '\n' => { line += 1; field.push(ch); }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ParseError { line: quote_line, reason: "unterminated quoted field" });
    }

    // Trailing row without a final newline
    if !field.is_empty() || !row.is_empty() || quoted {
        row.push(field);
        flush_row(&mut rows, &mut row, quoted);
    }

    Ok(rows)
}

fn flush_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, quoted: bool) {
    if !quoted && row.len() == 1 && row[0].is_empty() {
        row.clear();
    } else {
        rows.push(take(row));
    }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    // A lone empty cell would otherwise come out as a blank line, which parsing skips.
    if row.len() == 1 && row[0].is_empty() {
        return writeln!(w, "\"\"");
    }
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
