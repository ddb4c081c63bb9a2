//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {}", api_message(.0))]
    Api(#[from] octocrab::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status GitHub answered with, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(octocrab::Error::GitHub { source, .. }) => {
                Some(source.status_code.as_u16())
            }
            _ => None,
        }
    }
}

/// GitHub's own message plus any validation details
fn api_message(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => match source.errors {
            Some(ref errors) if !errors.is_empty() => {
                let details = serde_json::to_string(errors).unwrap_or_default();
                format!("{} {}", source.message, details)
            }
            _ => source.message.clone(),
        },
        other => other.to_string(),
    }
}

impl From<Error> for jira2gh_core::Error {
    fn from(err: Error) -> Self {
        jira2gh_core::Error::Tracker {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_api_errors_have_no_status() {
        assert_eq!(Error::Auth("nope".to_string()).status(), None);
        assert_eq!(Error::Parse("bad".to_string()).status(), None);
    }

    #[test]
    fn test_into_tracker_error() {
        let err: jira2gh_core::Error = Error::Other("socket closed".to_string()).into();
        match err {
            jira2gh_core::Error::Tracker { status, message } => {
                assert_eq!(status, None);
                assert_eq!(message, "socket closed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
