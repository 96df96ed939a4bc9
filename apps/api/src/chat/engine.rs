//! Profile Engine — orchestrates one question → answer exchange.
//!
//! Flow: route intent → expand aliases + score → format locally →
//!       (optional) augment via gateway, falling back to the local answer.
//!
//! Chunks, aliases and trigger vocabulary are built once per loaded profile.
//! The engine itself holds no per-conversation state.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chat::formatter::{format_response, FormattedAnswer, ResponseMode};
use crate::chat::session::SessionContext;
use crate::gateway::{AugmentRequest, Augmentation, Augmenter, GatewayError};
use crate::models::profile::ProfileDocument;
use crate::retrieval::aliases::AliasMap;
use crate::retrieval::chunker::{build_chunks, Chunk};
use crate::retrieval::intent::{Intent, IntentRouter};
use crate::retrieval::scoring::{
    retrieve_with, LengthWeighted, RankingPolicy, ScoredChunk, DEFAULT_LIMIT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOrigin {
    Local,
    Augmented,
}

/// The engine's reply: answer text plus optional follow-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    pub suggestions: Vec<String>,
    pub sources: Vec<String>,
    pub origin: AnswerOrigin,
}

impl Answer {
    fn local(formatted: FormattedAnswer, sources: Vec<String>) -> Self {
        Self {
            text: formatted.answer,
            suggestions: formatted.suggestions,
            sources,
            origin: AnswerOrigin::Local,
        }
    }
}

/// Intent plus the ranked chunks it produced.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub intent: Intent,
    pub chunks: Vec<ScoredChunk>,
}

pub struct ProfileEngine {
    chunks: Vec<Chunk>,
    aliases: AliasMap,
    router: IntentRouter,
    policy: Box<dyn RankingPolicy>,
    limit: usize,
}

impl ProfileEngine {
    pub fn new(profile: &ProfileDocument) -> Self {
        let chunks = build_chunks(profile);
        let aliases = AliasMap::from_profile(profile);
        let router = IntentRouter::new(profile, &aliases);

        info!(
            "Profile indexed: {} chunks, {} alias keys",
            chunks.len(),
            aliases.iter().count()
        );

        Self {
            chunks,
            aliases,
            router,
            policy: Box::new(LengthWeighted),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    #[cfg(test)]
    pub fn with_policy(mut self, policy: impl RankingPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Routes and ranks without formatting.
    pub fn retrieve(&self, query: &str) -> Retrieval {
        let (intent, candidates) = self.router.route(query, &self.chunks);
        let chunks = retrieve_with(
            self.policy.as_ref(),
            query,
            &candidates,
            &self.aliases,
            self.limit,
        );
        debug!(
            ?intent,
            candidates = candidates.len(),
            matched = chunks.len(),
            "Retrieval complete"
        );
        Retrieval { intent, chunks }
    }

    /// The network-independent answer path.
    pub fn answer_locally(&self, query: &str, mode: ResponseMode) -> Answer {
        let retrieval = self.retrieve(query);
        Answer::local(
            format_response(&retrieval.chunks, mode, &retrieval.intent),
            source_labels(&retrieval.chunks),
        )
    }

    /// Answers `query`, trying the augmenter first when the session allows it.
    ///
    /// Never fails: any gateway error, including the bounded wait expiring,
    /// yields the local answer for the same retrieved chunks. When nothing
    /// matched, the gateway is not called at all.
    pub async fn answer(
        &self,
        query: &str,
        mode: ResponseMode,
        session: &SessionContext,
        augmenter: Option<&dyn Augmenter>,
        timeout: Duration,
    ) -> Answer {
        let Some(augmenter) = augmenter.filter(|_| session.augmented) else {
            return self.answer_locally(query, mode);
        };

        let retrieval = self.retrieve(query);
        let sources = source_labels(&retrieval.chunks);
        let local = format_response(&retrieval.chunks, mode, &retrieval.intent);

        if retrieval.chunks.is_empty() {
            info!("No profile chunk matched the query");
            return Answer::local(local, sources);
        }

        let request = AugmentRequest::new(query, &retrieval.chunks, session.credential.clone());
        match augment_within(augmenter, &request, timeout).await {
            Ok(augmentation) => Answer {
                text: augmentation.content.trim().to_string(),
                suggestions: local.suggestions,
                sources,
                origin: AnswerOrigin::Augmented,
            },
            Err(e) => {
                warn!("Augmentation failed, answering locally: {e}");
                Answer::local(local, sources)
            }
        }
    }
}

/// Runs one augmentation attempt under a bounded wait.
pub async fn augment_within(
    augmenter: &dyn Augmenter,
    request: &AugmentRequest,
    timeout: Duration,
) -> Result<Augmentation, GatewayError> {
    match tokio::time::timeout(timeout, augmenter.augment(request)).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout(timeout)),
    }
}

fn source_labels(chunks: &[ScoredChunk]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for scored in chunks {
        if !labels.contains(&scored.chunk.source_label) {
            labels.push(scored.chunk.source_label.clone());
        }
    }
    labels
}
