//! Error types for jira2gh

use thiserror::Error;

/// Result type alias for migration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for migration operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The JIRA export could not be read
    #[error("Export error: {0}")]
    Export(String),

    /// A reference rule has an invalid pattern
    #[error("Invalid reference pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The target tracker reported a failure
    #[error("{}", tracker_message(.status, .message))]
    Tracker {
        /// HTTP status, when the tracker supplied one
        status: Option<u16>,
        /// Failure detail
        message: String,
    },

    /// Placeholder reconciliation had to stop
    #[error("Reconciliation aborted at {location}: {source}")]
    Protocol {
        /// Page cursor or comment URL the failure happened on
        location: String,
        /// Underlying tracker failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// HTTP status attached to a tracker failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Tracker { status, .. } => *status,
            Error::Protocol { source, .. } => source.status(),
            _ => None,
        }
    }
}

fn tracker_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Tracker error (HTTP {}): {}", code, message),
        None => format!("Tracker error: {}", message),
    }
}
