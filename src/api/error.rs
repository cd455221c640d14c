//! Core error types for request/response handling.

use std::fmt;

/// Errors surfaced by the respond path.
#[derive(Debug)]
pub enum Error {
    /// Payload failed to serialize. This is a contract violation by the
    /// caller, not a runtime condition: the dispatcher must abort the
    /// in-flight request with a 500 and must not reuse the sink.
    Encode {
        status: u16,
        source: serde_json::Error,
    },

    /// A status head was already written for this response.
    HeadAlreadyWritten,

    /// Body bytes were written before the status head.
    HeadNotWritten,
}

impl Error {
    /// Whether this error must abort the request path (programmer error)
    /// rather than being reportable to the client.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Encode { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Encode { status, source } => {
                write!(f, "payload failed to encode for status {}: {}", status, source)
            }
            Error::HeadAlreadyWritten => write!(f, "response head already written"),
            Error::HeadNotWritten => write!(f, "body written before response head"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Encode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for respond operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HeadAlreadyWritten;
        assert_eq!(err.to_string(), "response head already written");

        let err = Error::HeadNotWritten;
        assert_eq!(err.to_string(), "body written before response head");
    }

    #[test]
    fn test_encode_is_fatal() {
        let source = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = Error::Encode { status: 200, source };

        assert!(err.is_fatal());
        assert!(err.to_string().contains("status 200"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_head_guards_are_not_fatal() {
        assert!(!Error::HeadAlreadyWritten.is_fatal());
        assert!(!Error::HeadNotWritten.is_fatal());
    }
}
