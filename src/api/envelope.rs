//! JSON error envelope shared by all non-2xx responses.

use serde::{Deserialize, Serialize};

/// A validation error belonging to a specific field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invalid {
    /// Name of the offending field.
    #[serde(rename = "field_name")]
    pub field: String,

    /// Human-readable description of what is wrong with it.
    pub error: String,
}

impl Invalid {
    /// Create a field validation error.
    #[inline]
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

/// Top-level body shape for every error response.
///
/// `fields` is omitted from the serialized output when empty, so a plain
/// error renders as `{"error": "..."}` with no `fields` key at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable top-level message.
    pub error: String,

    /// Per-field validation errors, in the order the caller supplied them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Invalid>,
}

impl ErrorEnvelope {
    /// Envelope with a message and no field errors.
    #[inline]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }

    /// Envelope describing field validation failures.
    #[inline]
    pub fn invalid(fields: Vec<Invalid>) -> Self {
        Self {
            error: "field validation failure".to_string(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_key_omitted_when_empty() {
        let env = ErrorEnvelope::new("not found");
        let json = serde_json::to_string(&env).unwrap();

        assert_eq!(json, r#"{"error":"not found"}"#);
        assert!(!json.contains("fields"));
    }

    #[test]
    fn test_fields_serialized_in_order() {
        let env = ErrorEnvelope::invalid(vec![
            Invalid::new("name", "required"),
            Invalid::new("email", "malformed"),
        ]);
        let json = serde_json::to_string(&env).unwrap();

        assert_eq!(
            json,
            r#"{"error":"field validation failure","fields":[{"field_name":"name","error":"required"},{"field_name":"email","error":"malformed"}]}"#
        );
    }

    #[test]
    fn test_envelope_round_trip() {
        let env = ErrorEnvelope::invalid(vec![Invalid::new("name", "required")]);
        let json = serde_json::to_vec(&env).unwrap();
        let back: ErrorEnvelope = serde_json::from_slice(&json).unwrap();

        assert_eq!(back, env);
    }

    #[test]
    fn test_plain_error_round_trip() {
        // Deserializing a body with no fields key yields an empty Vec.
        let back: ErrorEnvelope = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(back, ErrorEnvelope::new("boom"));
    }
}
