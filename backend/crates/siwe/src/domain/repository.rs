//! Repository Traits
//!
//! Interfaces for challenge-binding persistence. Implementations live
//! in the infrastructure layer.

use crate::domain::entities::PendingChallenge;
use crate::error::SiweResult;
use uuid::Uuid;

/// Challenge binding repository trait
///
/// At most one challenge is outstanding per session. `take` must be
/// atomic with respect to concurrent callers: of two verification
/// attempts racing on the same session, exactly one observes the
/// binding and the other gets `None`.
#[trait_variant::make(ChallengeBindingRepository: Send)]
pub trait LocalChallengeBindingRepository {
    /// Store a binding, replacing any pending challenge for the session
    async fn store(&self, binding: &PendingChallenge) -> SiweResult<()>;

    /// Remove and return the pending binding for a session, atomically
    async fn take(&self, session_id: Uuid) -> SiweResult<Option<PendingChallenge>>;
}
