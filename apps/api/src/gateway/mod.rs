//! LLM Gateway — optional rephrasing of retrieved chunks by a remote model.
//!
//! The gateway only ever sees the retrieved chunks, never the full profile.
//! Every failure is a `GatewayError`; the chat engine turns any of them into
//! the local formatter's answer for the same chunks.
//!
//! `Augmenter` is the seam: `DirectAugmenter` calls the completions API in
//! process, `RemoteGateway` forwards to a separately deployed gateway.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::retrieval::chunker::SectionType;
use crate::retrieval::scoring::ScoredChunk;

pub mod direct;
pub mod handlers;
pub mod prompts;
pub mod remote;

pub use direct::DirectAugmenter;
pub use remote::RemoteGateway;

/// One retrieved chunk as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextChunk {
    pub content: String,
    pub source: String,
    #[serde(rename = "type")]
    pub section: SectionType,
}

/// Augmentation request: the raw query plus the retrieved context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentRequest {
    pub query: String,
    pub context: Vec<ContextChunk>,
    #[serde(default, alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl AugmentRequest {
    pub fn new(query: &str, chunks: &[ScoredChunk], credential: Option<String>) -> Self {
        Self {
            query: query.to_string(),
            context: chunks
                .iter()
                .map(|s| ContextChunk {
                    content: s.chunk.content.clone(),
                    source: s.chunk.source_label.clone(),
                    section: s.chunk.section,
                })
                .collect(),
            credential,
        }
    }

    /// De-duplicated source labels in context order, comma-joined.
    pub fn sources(&self) -> String {
        let mut seen: Vec<&str> = Vec::new();
        for chunk in &self.context {
            if !seen.contains(&chunk.source.as_str()) {
                seen.push(&chunk.source);
            }
        }
        seen.join(", ")
    }
}

/// Successful gateway response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Augmentation {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no credential available for the augmentation service")]
    MissingCredential,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("gateway returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed gateway response: {0}")]
    Malformed(String),

    #[error("gateway returned empty content")]
    EmptyContent,

    #[error("gateway did not answer within {0:?}")]
    Timeout(Duration),
}

impl From<LlmError> for GatewayError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) if e.is_timeout() => {
                GatewayError::Transport(format!("timed out: {e}"))
            }
            LlmError::Http(e) => GatewayError::Transport(e.to_string()),
            LlmError::Api { status, message } => GatewayError::Status { status, message },
            LlmError::Malformed(msg) => GatewayError::Malformed(msg),
            LlmError::EmptyContent => GatewayError::EmptyContent,
        }
    }
}

/// Port for the optional remote rephrasing step.
#[async_trait]
pub trait Augmenter: Send + Sync {
    async fn augment(&self, request: &AugmentRequest) -> Result<Augmentation, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::chunker::Chunk;

    fn scored(label: &str) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk {
                content: format!("content of {label}"),
                source_label: label.to_string(),
                section: SectionType::Experience,
            },
            score: 5,
        }
    }

    #[test]
    fn test_request_serializes_wire_shape() {
        let request = AugmentRequest::new("q", &[scored("Experience – Acme")], None);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["context"][0]["type"], "experience");
        assert_eq!(value["context"][0]["source"], "Experience – Acme");
        assert!(value.get("credential").is_none());
    }

    #[test]
    fn test_request_accepts_api_key_alias() {
        let request: AugmentRequest =
            serde_json::from_str(r#"{"query": "q", "context": [], "apiKey": "sk-user"}"#).unwrap();
        assert_eq!(request.credential.as_deref(), Some("sk-user"));
    }

    #[test]
    fn test_sources_are_deduplicated_in_order() {
        let request = AugmentRequest::new("q", &[scored("B"), scored("A"), scored("B")], None);
        assert_eq!(request.sources(), "B, A");
    }
}
