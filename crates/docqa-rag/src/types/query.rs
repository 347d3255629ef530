//! Request bodies

use serde::{Deserialize, Serialize};

/// Question about a previously uploaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    pub question: String,
    /// Identifier returned by the upload endpoint
    pub document_id: String,
    /// API key used for this question only
    #[serde(default, alias = "api_key")]
    pub credential: Option<String>,
}

/// Replacement for the process-wide default API key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsRequest {
    #[serde(alias = "deepseek_api_key")]
    pub credential: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_request_aliases() {
        let req: AskRequest = serde_json::from_str(
            r#"{"question":"q?","document_id":"abc","api_key":"sk-1"}"#,
        )
        .unwrap();
        assert_eq!(req.credential.as_deref(), Some("sk-1"));

        let req: AskRequest =
            serde_json::from_str(r#"{"question":"q?","document_id":"abc"}"#).unwrap();
        assert!(req.credential.is_none());
    }

    #[test]
    fn test_settings_alias() {
        let req: SettingsRequest =
            serde_json::from_str(r#"{"deepseek_api_key":"sk-2"}"#).unwrap();
        assert_eq!(req.credential, "sk-2");
    }
}
