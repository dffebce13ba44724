//! Upstream error types.

use thiserror::Error;

/// Result type for upstream operations.
pub type ScholarResult<T> = Result<T, ScholarError>;

/// Errors raised while talking to the Semantic Scholar Graph API.
///
/// None of these ever reach the protocol host as a fault: tools render them
/// into a text result with [`ScholarError::to_text`].
#[derive(Debug, Error)]
pub enum ScholarError {
    /// Network failure, timeout, or an unreadable response body.
    #[error("{0}")]
    Transport(String),

    /// The upstream answered with a non-200 status.
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The upstream answered 404 for a paper-scoped endpoint.
    #[error("Paper not found: {0}")]
    PaperNotFound(String),

    /// The 200 body was not valid JSON.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The 200 body parsed but does not have the expected shape.
    #[error("unexpected response: {0}")]
    Payload(String),

    /// The call arguments could not be read.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The blocking worker running the request died.
    #[error("worker failed: {0}")]
    Worker(String),
}

impl ScholarError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an invalid arguments error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Render this error as the text a caller receives.
    ///
    /// Status and not-found errors have fixed shapes; everything else is
    /// prefixed with the operation label, e.g. `Error searching papers: ...`.
    pub fn to_text(&self, label: &str) -> String {
        match self {
            Self::Status { .. } => format!("Error: {self}"),
            Self::PaperNotFound(_) => self.to_string(),
            other => format!("{label}: {other}"),
        }
    }
}

impl From<reqwest::Error> for ScholarError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_has_no_label() {
        let err = ScholarError::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_text("Error searching papers"),
            "Error: API returned status 500: Internal Server Error"
        );
    }

    #[test]
    fn test_not_found_text() {
        let err = ScholarError::PaperNotFound("X".to_string());
        assert_eq!(err.to_text("Error getting paper details"), "Paper not found: X");
    }

    #[test]
    fn test_transport_text_is_labeled() {
        let err = ScholarError::transport("Network error");
        assert_eq!(
            err.to_text("Error searching papers"),
            "Error searching papers: Network error"
        );
    }

    #[test]
    fn test_decode_text_is_labeled() {
        let err: ScholarError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.to_text("Error getting authors").starts_with("Error getting authors: "));
    }
}
