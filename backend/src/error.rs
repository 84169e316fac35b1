//! Error taxonomy of the explorer engine.

use thiserror::Error;

pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum ExplorerError {
    /// An indirect lookup or catalog fetch failed; dependent query
    /// compilation halts until the next selection change.
    #[error("catalog resolution failed: {0}")]
    Resolution(#[source] anyhow::Error),

    /// The negotiator rejected an export. The raw response body is kept
    /// verbatim so the message can be derived per its contract.
    #[error("negotiator export failed")]
    Export { body: serde_json::Value },

    /// A required startup invariant is violated. Fatal.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ExplorerError {
    /// The message shown to the user. Export errors derive it from the
    /// response body: a structured error list first, then a bare message
    /// field, then a fixed fallback.
    pub fn user_message(&self) -> String {
        match self {
            ExplorerError::Export { body } => export_error_message(body),
            ExplorerError::Resolution(err) => err.to_string(),
            ExplorerError::Configuration(msg) => msg.clone(),
        }
    }
}

pub fn export_error_message(body: &serde_json::Value) -> String {
    if let Some(message) = body
        .get("errors")
        .and_then(|errors| errors.get(0))
        .and_then(|first| first.get("message"))
        .and_then(|m| m.as_str())
    {
        return message.to_string();
    }
    if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
        return message.to_string();
    }
    FALLBACK_ERROR_MESSAGE.to_string()
}
