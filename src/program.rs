//! Program text loading.
//!
//! Programs are distributed as a single line of comma-separated
//! base-10 integers, optionally signed. Parsing lives on the host
//! side; the interpreter core only ever sees the integer slice.

use std::path::Path;
use thiserror::Error;

/// Parse a program from comma-separated integer text.
///
/// Surrounding whitespace around each value is tolerated.
pub fn parse_program(text: &str) -> Result<Vec<i64>, ProgramError> {
    text.trim()
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            token.trim().parse::<i64>().map_err(|e| ProgramError::ParseError {
                index,
                message: format!("{:?}: {}", token.trim(), e),
            })
        })
        .collect()
}

/// Load a program from a file.
///
/// The first non-empty line holds the program; anything after it is
/// ignored.
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Vec<i64>, ProgramError> {
    let contents = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ProgramError::IoError(e.to_string()))?;

    let line = contents
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or(ProgramError::Empty)?;

    parse_program(line)
}

/// Errors that can occur while loading program text.
#[derive(Debug, Clone, Error)]
pub enum ProgramError {
    #[error("io error: {0}")]
    IoError(String),

    #[error("value {index}: {message}")]
    ParseError { index: usize, message: String },

    #[error("no program found in file")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(parse_program("1,0,0,0,99").unwrap(), vec![1, 0, 0, 0, 99]);
    }

    #[test]
    fn test_parse_signed_and_padded() {
        assert_eq!(
            parse_program(" 109, -1, +3 ,99\n").unwrap(),
            vec![109, -1, 3, 99]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_program("1,two,3").unwrap_err();
        assert!(matches!(err, ProgramError::ParseError { index: 1, .. }));
    }
}
