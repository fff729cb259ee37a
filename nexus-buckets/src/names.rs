//! Newline-delimited key files.
//!
//! Every line is one key, taken verbatim apart from its line terminator
//! (`\n` or `\r\n`). Blank lines are kept as empty keys. Bytes that are not
//! valid UTF-8 are replaced with U+FFFD one line at a time, so a bad line
//! never costs the lines around it.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads every line of `path` as a key.
///
/// # Errors
///
/// Returns any I/O error from opening or reading the file. Use
/// [`read_names_into`] to keep the names read before a failure.
pub fn read_names(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    read_names_into(path, &mut names)?;
    Ok(names)
}

/// Appends every line of `path` to `names`.
///
/// On error, `names` still holds every line read before the failure.
///
/// # Errors
///
/// Returns any I/O error from opening or reading the file.
pub fn read_names_into(path: impl AsRef<Path>, names: &mut Vec<String>) -> io::Result<()> {
    let path = path.as_ref();
    let before = names.len();
    let result = parse_names_into(BufReader::new(File::open(path)?), names);
    tracing::debug!(path = %path.display(), count = names.len() - before, "read names");
    result
}

/// Reads every line of `reader` as a key.
///
/// # Errors
///
/// Returns any I/O error from the reader.
pub fn parse_names(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    parse_names_into(reader, &mut names)?;
    Ok(names)
}

/// Appends every line of `reader` to `names`.
///
/// # Errors
///
/// Returns any I/O error from the reader. Lines read before the error are
/// already in `names`.
pub fn parse_names_into(mut reader: impl BufRead, names: &mut Vec<String>) -> io::Result<()> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        names.push(String::from_utf8_lossy(&line).into_owned());
    }
}
