//! Error taxonomy for the binding engine
//!
//! All failures are local and non-fatal: a rejected mutation leaves the
//! tables untouched, and the resolve path never errors (absent bindings
//! yield empty lists).

use std::fmt;

/// Errors that can occur when mutating or loading bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Malformed key, combination or chain text
    Parse(String),
    /// Action text yields no command word
    EmptyAction(String),
    /// Bind-file load graph contains a cycle
    CyclicLoad(String),
    /// File could not be read or written
    Io(String),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::Parse(s) => write!(f, "could not parse key: {}", s),
            BindError::EmptyAction(s) => write!(f, "empty action: {}", s),
            BindError::CyclicLoad(s) => write!(f, "cyclic bind-file inclusion: {}", s),
            BindError::Io(s) => write!(f, "IO error: {}", s),
        }
    }
}

impl std::error::Error for BindError {}
