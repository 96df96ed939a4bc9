//! Per-request session context and the per-conversation in-flight flag.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

/// Everything the engine needs to know about the caller's session.
/// Built fresh for every request; the engine never reads ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Whether the augmented (LLM) path should be attempted.
    pub augmented: bool,
    /// User-supplied credential, forwarded to the gateway if present.
    pub credential: Option<String>,
}

impl SessionContext {
    #[cfg(test)]
    pub fn local() -> Self {
        Self::default()
    }

    /// Augmented mode is on when some credential exists (server-held or
    /// user-supplied) and the caller has not opted out.
    pub fn resolve(server_has_key: bool, user_key: Option<String>, use_llm: Option<bool>) -> Self {
        let credential = user_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let has_credential = server_has_key || credential.is_some();
        Self {
            augmented: has_credential && use_llm.unwrap_or(true),
            credential,
        }
    }
}

/// Tracks which conversations have a request in flight.
#[derive(Debug, Default)]
pub struct ConversationRegistry {
    in_flight: Mutex<HashSet<Uuid>>,
}

impl ConversationRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Marks `id` as in flight. Returns `None` if it already was; the flag is
    /// cleared when the returned guard drops.
    pub fn try_begin(self: &Arc<Self>, id: Uuid) -> Option<InFlightGuard> {
        if !self.lock().insert(id) {
            return None;
        }
        Some(InFlightGuard {
            registry: Arc::clone(self),
            id,
        })
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, id: Uuid) -> bool {
        self.lock().contains(&id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Uuid>> {
        // The set stays consistent even if a holder panicked mid-request
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    registry: Arc<ConversationRegistry>,
    id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.id);
    }
}
