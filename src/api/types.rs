//! JSON request and response bodies.
//!
//! Field names on the wire follow the gateway's published JSON (`phi`,
//! `result`, `architect`, ...); the Rust names describe what they hold.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{
    CHAT_PLACEHOLDER_REPLY, CORE_LABEL, OWNER_LABEL, PHI, SYSTEM_NAME, SYSTEM_VERSION,
};

/// Current time as RFC 3339, UTC, second precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemState {
    Online,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    #[serde(rename = "status")]
    pub state: SystemState,
    #[serde(rename = "system")]
    pub system_name: String,
    pub version: String,
    #[serde(rename = "core")]
    pub core_label: String,
    #[serde(rename = "phi")]
    pub score_value: f64,
    #[serde(rename = "architect")]
    pub owner_label: String,
    pub timestamp: String,
}

impl StatusInfo {
    /// A fresh snapshot stamped with the current time.
    pub fn now() -> Self {
        Self {
            state: SystemState::Online,
            system_name: SYSTEM_NAME.to_string(),
            version: SYSTEM_VERSION.to_string(),
            core_label: CORE_LABEL.to_string(),
            score_value: PHI,
            owner_label: OWNER_LABEL.to_string(),
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(default, rename = "script")]
    pub script_name: Option<String>,
}

impl SimulationRequest {
    /// The requested script, or `default` when absent or blank.
    pub fn script_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.script_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => default,
        }
    }
}

/// Outcome of one script run. `output` is set on success, `error_message`
/// on failure, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(rename = "success")]
    pub succeeded: bool,
    #[serde(rename = "result", default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(rename = "script")]
    pub script_name: String,
    pub timestamp: String,
}

impl SimulationResult {
    pub fn success(script_name: &str, output: String) -> Self {
        Self {
            succeeded: true,
            output: Some(output),
            error_message: None,
            script_name: script_name.to_string(),
            timestamp: timestamp(),
        }
    }

    pub fn failure(script_name: &str, error_message: String) -> Self {
        Self {
            succeeded: false,
            output: None,
            error_message: Some(error_message),
            script_name: script_name.to_string(),
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResult {
    #[serde(rename = "success")]
    pub succeeded: bool,
    #[serde(rename = "message")]
    pub echoed_message: String,
    #[serde(rename = "response")]
    pub reply_text: String,
    #[serde(rename = "phi")]
    pub score_value: f64,
    pub timestamp: String,
}

impl ChatResult {
    /// The stub reply: echo the message back with the canned response.
    pub fn echo(message: &str) -> Self {
        Self {
            succeeded: true,
            echoed_message: message.to_string(),
            reply_text: CHAT_PLACEHOLDER_REPLY.to_string(),
            score_value: PHI,
            timestamp: timestamp(),
        }
    }

    pub fn rejected() -> Self {
        Self {
            succeeded: false,
            echoed_message: String::new(),
            reply_text: String::new(),
            score_value: 0.0,
            timestamp: timestamp(),
        }
    }
}

/// Body of errors that have no richer response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamp_is_rfc3339() {
        let ts = timestamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn status_serializes_with_wire_names() {
        let value = serde_json::to_value(StatusInfo::now()).unwrap();
        assert_eq!(value["status"], "online");
        assert_eq!(value["phi"], json!(0.64));
        assert_eq!(value["version"], "5.0-GODMODE");
        assert!(value.get("architect").is_some());
        assert!(value.get("core").is_some());
    }

    #[test]
    fn simulation_request_defaults() {
        let req: SimulationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.script_or("genesis_run.jl"), "genesis_run.jl");

        let req: SimulationRequest = serde_json::from_str(r#"{"script": "  "}"#).unwrap();
        assert_eq!(req.script_or("genesis_run.jl"), "genesis_run.jl");

        let req: SimulationRequest = serde_json::from_str(r#"{"script": "other.jl"}"#).unwrap();
        assert_eq!(req.script_or("genesis_run.jl"), "other.jl");
    }

    #[test]
    fn simulation_success_omits_error() {
        let value = serde_json::to_value(SimulationResult::success("a.jl", "out".into())).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["result"], "out");
        assert!(value.get("error").is_none());
        assert_eq!(value["script"], "a.jl");
    }

    #[test]
    fn simulation_failure_omits_result() {
        let value = serde_json::to_value(SimulationResult::failure("a.jl", "bad".into())).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "bad");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn chat_request_missing_message_is_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_empty());
    }

    #[test]
    fn chat_echo_fields() {
        let value = serde_json::to_value(ChatResult::echo("hi")).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "hi");
        assert_eq!(value["response"], CHAT_PLACEHOLDER_REPLY);
        assert_eq!(value["phi"], json!(PHI));
    }
}
