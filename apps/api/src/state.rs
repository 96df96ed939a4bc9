use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::chat::engine::ProfileEngine;
use crate::chat::session::ConversationRegistry;
use crate::config::Config;
use crate::gateway::{Augmenter, DirectAugmenter, RemoteGateway};
use crate::llm_client::{self, LlmClient};
use crate::models::profile::ProfileDocument;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub profile: Arc<ProfileDocument>,
    /// Chunks, aliases and triggers built once for the loaded profile.
    pub engine: Arc<ProfileEngine>,
    /// Backs `/api/v1/augment` and the `hasKey` check.
    pub direct: Arc<DirectAugmenter>,
    /// Used by the chat path. Remote when `AUGMENT_GATEWAY_URL` is set, else `direct`.
    pub augmenter: Arc<dyn Augmenter>,
    pub conversations: Arc<ConversationRegistry>,
}

impl AppState {
    pub fn build(config: Config, profile: ProfileDocument) -> Result<Self> {
        let engine = ProfileEngine::new(&profile).with_limit(config.retrieval_limit);

        let llm = LlmClient::new(config.openai_api_base.clone(), config.augment_timeout)
            .context("Failed to build completions client")?;
        info!("LLM client initialized (model: {})", llm_client::MODEL);

        let direct = Arc::new(DirectAugmenter::new(
            llm,
            config.openai_api_key.clone(),
            &profile.contact.name,
        ));

        let augmenter: Arc<dyn Augmenter> = match &config.augment_gateway_url {
            Some(url) => {
                info!("Chat augmentation forwarded to {url}");
                Arc::new(
                    RemoteGateway::new(url.clone(), config.augment_timeout)
                        .context("Failed to build gateway client")?,
                )
            }
            None => direct.clone() as Arc<dyn Augmenter>,
        };

        Ok(Self {
            config,
            profile: Arc::new(profile),
            engine: Arc::new(engine),
            direct,
            augmenter,
            conversations: ConversationRegistry::new(),
        })
    }
}
