//! In-Memory Repository Implementation
//!
//! Single-process challenge store for tests and local development.
//! The mutex makes `take` a remove-or-nothing operation, so two
//! concurrent verification attempts for the same session cannot both
//! observe the binding.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::PendingChallenge;
use crate::domain::repository::ChallengeBindingRepository;
use crate::error::SiweResult;

#[derive(Clone, Default)]
pub struct InMemoryChallengeRepository {
    bindings: Arc<Mutex<HashMap<Uuid, PendingChallenge>>>,
}

impl InMemoryChallengeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChallengeBindingRepository for InMemoryChallengeRepository {
    async fn store(&self, binding: &PendingChallenge) -> SiweResult<()> {
        self.bindings
            .lock()
            .await
            .insert(binding.session_id, binding.clone());
        Ok(())
    }

    async fn take(&self, session_id: Uuid) -> SiweResult<Option<PendingChallenge>> {
        Ok(self.bindings.lock().await.remove(&session_id))
    }
}
