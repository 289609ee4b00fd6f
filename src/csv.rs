// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single delimited row to any writer. Quotes are doubled inside
/// quoted cells.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

/* ---------------- Parsing ---------------- */

/// Read back rows written by [`write_row`] (quotes + CRLF tolerant).
/// Used to verify exported files.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if row.len() == 1 && row[0].is_empty() {
                    row.clear(); // blank line
                } else {
                    rows.push(take(&mut row));
                }
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(row: &[&str]) -> String {
        let mut buf = Vec::new();
        write_row(&mut buf, row, ',').unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_cells_are_not_quoted() {
        assert_eq!(line(&["a", "", "3"]), "a,,3\n");
    }

    #[test]
    fn separators_and_quotes_are_escaped() {
        assert_eq!(line(&["VCT 2024: Stage 1, Week 2"]), "\"VCT 2024: Stage 1, Week 2\"\n");
        assert_eq!(line(&["say \"gg\""]), "\"say \"\"gg\"\"\"\n");
    }

    #[test]
    fn parse_reads_back_what_write_produced() {
        let text = line(&["Masters, Madrid", "x\"y", ""]) + &line(&["1", "2", "3"]);
        let rows = parse_rows(&text, ',');
        assert_eq!(rows, vec![
            vec!["Masters, Madrid".to_string(), "x\"y".into(), "".into()],
            vec!["1".to_string(), "2".into(), "3".into()],
        ]);
    }
}
