use std::path::Path;

use crate::error::{MustcError, Result};

/// Read a sentence file, one entry per line.
///
/// Lines end at `\r\n`, `\n` or a lone `\r`. They are returned untrimmed.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| MustcError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(split_lines(&contents))
}

fn split_lines(contents: &str) -> Vec<String> {
    contents
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::to_string)
        .collect()
}
