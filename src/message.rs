// src/message.rs
use serde::{Deserialize, Serialize};

/// Discriminator value the chat endpoint uses for a successful reply.
pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn success(reply: impl Into<String>) -> Self {
        Self {
            status: Some(STATUS_SUCCESS.to_string()),
            response: Some(reply.into()),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_loaded_reads_as_not_loaded() {
        let status: StatusResponse = serde_json::from_str(r#"{"status":"online"}"#).unwrap();
        assert!(!status.model_loaded);
    }

    #[test]
    fn business_failure_is_not_success() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"status":"error","error":"model exploded"}"#).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.error.as_deref(), Some("model exploded"));
    }
}
