//! Environment variable parsing utilities.

use std::str::FromStr;

use super::ConfigError;

/// Get environment variable with default value.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get optional environment variable (None if empty or missing).
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Parse environment variable as boolean.
/// Treats "1", "true" (case-insensitive) as true.
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(default)
}

/// Parse environment variable with type conversion.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v.parse().map_err(|e: T::Err| ConfigError::Parse {
            key: key.into(),
            value: v,
            error: e.to_string(),
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    #[test]
    fn test_env_or() {
        std::env::remove_var("TEST_ENV_OR_MISSING");
        assert_eq!(env_or("TEST_ENV_OR_MISSING", "fallback"), "fallback");

        std::env::set_var("TEST_ENV_OR_SET", "value");
        assert_eq!(env_or("TEST_ENV_OR_SET", "fallback"), "value");
        std::env::remove_var("TEST_ENV_OR_SET");
    }

    #[test]
    fn test_env_opt_filters_empty() {
        std::env::set_var("TEST_ENV_OPT_EMPTY", "");
        assert_eq!(env_opt("TEST_ENV_OPT_EMPTY"), None);
        std::env::remove_var("TEST_ENV_OPT_EMPTY");
    }

    #[test]
    fn test_env_bool() {
        std::env::set_var("TEST_ENV_BOOL", "1");
        assert!(env_bool("TEST_ENV_BOOL", false));

        std::env::set_var("TEST_ENV_BOOL", "True");
        assert!(env_bool("TEST_ENV_BOOL", false));

        std::env::set_var("TEST_ENV_BOOL", "no");
        assert!(!env_bool("TEST_ENV_BOOL", true));
        std::env::remove_var("TEST_ENV_BOOL");
    }

    #[test]
    fn test_env_parse() {
        std::env::set_var("TEST_ENV_PARSE_ADDR", "127.0.0.1:9000");
        let addr: SocketAddr =
            env_parse("TEST_ENV_PARSE_ADDR", "0.0.0.0:8080".parse().unwrap()).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:9000");

        std::env::set_var("TEST_ENV_PARSE_ADDR", "not-an-addr");
        let err = env_parse::<SocketAddr>("TEST_ENV_PARSE_ADDR", "0.0.0.0:8080".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        std::env::remove_var("TEST_ENV_PARSE_ADDR");
    }
}
