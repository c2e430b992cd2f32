use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Status { code: u16, url: String },
    Browser(String),
    MissingInput(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::Status { code, url } => write!(f, "HTTP {code} for {url}"),
            FetchError::Browser(msg) => write!(f, "Browser error: {msg}"),
            FetchError::MissingInput(msg) => write!(f, "Missing input: {msg}"),
        }
    }
}

impl Error for FetchError {}
