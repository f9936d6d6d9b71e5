use crate::normalizer::{display_value, RecordSet};
use regex::Regex;
use std::io::{self, Write};
use std::sync::OnceLock;

const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row, `\n` terminated.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first {
            write!(w, "{}", SEP)?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Column names of a record set: every key of every record, first-seen order.
pub fn columns(record_set: &RecordSet) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for record in record_set.records() {
        for key in record.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }
    columns
}

/// Serializes a record set as CSV: a header row, then one row per record with
/// missing fields left empty.
pub fn to_csv(record_set: &RecordSet) -> String {
    let columns = columns(record_set);

    let mut out: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_row(&mut out, &columns);
    for record in record_set.records() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(*column).map(display_value).unwrap_or_default())
            .collect();
        let _ = write_row(&mut out, &row);
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Download filename for a term: `numinfo_<term>.csv`, with every run of
/// characters outside `[A-Za-z0-9_]` replaced by `_`.
pub fn csv_filename(term: &str) -> String {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    let re = NON_WORD.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
    format!("numinfo_{}.csv", re.replace_all(term, "_"))
}
