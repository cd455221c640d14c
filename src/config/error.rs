//! Configuration error types.

use std::fmt;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse environment variable.
    Parse {
        key: String,
        value: String,
        error: String,
    },
    /// Missing required environment variable.
    Missing { key: String },
    /// Invalid value for environment variable.
    Invalid { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse { key, value, error } => {
                write!(f, "failed to parse {}='{}': {}", key, value, error)
            }
            ConfigError::Missing { key } => {
                write!(f, "missing required environment variable: {}", key)
            }
            ConfigError::Invalid { key, message } => {
                write!(f, "invalid value for {}: {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::Missing {
            key: "AUTH_TOKEN".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing required environment variable: AUTH_TOKEN"
        );

        let err = ConfigError::Parse {
            key: "LISTEN_ADDR".into(),
            value: "nope".into(),
            error: "invalid socket address".into(),
        };
        assert!(err.to_string().contains("LISTEN_ADDR"));
        assert!(err.to_string().contains("nope"));
    }
}
