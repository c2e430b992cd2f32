// src/merge/merge_error.rs

use std::fmt;

#[derive(Debug)]
pub enum MergeError {
    Io(String),
    Csv(String),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::Io(msg) => write!(f, "File error: {}", msg),
            MergeError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for MergeError {}

impl From<std::io::Error> for MergeError {
    fn from(e: std::io::Error) -> Self {
        MergeError::Io(e.to_string())
    }
}

impl From<csv::Error> for MergeError {
    fn from(e: csv::Error) -> Self {
        MergeError::Csv(e.to_string())
    }
}
