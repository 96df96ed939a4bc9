//! In-process augmenter: builds the answer prompt and calls the completions API.

use async_trait::async_trait;
use tracing::debug;

use crate::gateway::prompts::{build_answer_prompt, build_system_prompt};
use crate::gateway::{AugmentRequest, Augmentation, Augmenter, GatewayError};
use crate::llm_client::LlmClient;

#[derive(Clone)]
pub struct DirectAugmenter {
    llm: LlmClient,
    server_key: Option<String>,
    system_prompt: String,
}

impl DirectAugmenter {
    pub fn new(llm: LlmClient, server_key: Option<String>, owner_name: &str) -> Self {
        Self {
            llm,
            server_key: server_key.filter(|k| !k.trim().is_empty()),
            system_prompt: build_system_prompt(owner_name),
        }
    }

    pub fn has_server_key(&self) -> bool {
        self.server_key.is_some()
    }

    /// Server-held key first, then the caller's.
    fn credential<'a>(&'a self, request: &'a AugmentRequest) -> Option<&'a str> {
        self.server_key
            .as_deref()
            .or(request.credential.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[async_trait]
impl Augmenter for DirectAugmenter {
    async fn augment(&self, request: &AugmentRequest) -> Result<Augmentation, GatewayError> {
        let api_key = self.credential(request).ok_or(GatewayError::MissingCredential)?;
        let prompt = build_answer_prompt(request);

        debug!(
            "Augmenting answer from {} context chunks",
            request.context.len()
        );
        let content = self.llm.complete(api_key, &self.system_prompt, &prompt).await?;

        Ok(Augmentation {
            content,
            source: Some(request.sources()),
        })
    }
}
