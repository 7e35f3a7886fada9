//! Uniform results reported by platform adapters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a publish call.
///
/// Adapters always return an outcome, never an error, so callers can treat
/// publishing as a best-effort side effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishOutcome {
    /// Whether the platform accepted the write.
    success: bool,
    /// Normalized platform response on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    /// Error description on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl PublishOutcome {
    /// Successful outcome carrying the platform response.
    pub fn succeeded(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed outcome.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Whether the platform accepted the write.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Normalized platform response.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Error description.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Platform identifier of the created post, when the response has one.
    pub fn post_id(&self) -> Option<String> {
        let id = self.data.as_ref()?.get("id")?;
        match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Result of a connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Whether the credentials were accepted.
    success: bool,
    /// Account or page name reported by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identity: Option<String>,
    /// Error description on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ConnectionStatus {
    /// Connection verified as `identity`.
    pub fn connected(identity: impl Into<String>) -> Self {
        Self {
            success: true,
            identity: Some(identity.into()),
            error: None,
        }
    }

    /// Whether the credentials were accepted.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Account or page name reported by the platform.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Error description.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Connection could not be verified.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            identity: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_id_string_and_number() {
        assert_eq!(
            PublishOutcome::succeeded(json!({"id": "123"})).post_id(),
            Some("123".to_string())
        );
        assert_eq!(
            PublishOutcome::succeeded(json!({"id": 42})).post_id(),
            Some("42".to_string())
        );
        assert_eq!(PublishOutcome::failed("boom").post_id(), None);
    }

    #[test]
    fn test_failed_serializes_without_data() {
        let value = serde_json::to_value(PublishOutcome::failed("nope")).expect("serializable");
        assert_eq!(value, json!({"success": false, "error": "nope"}));
    }
}
