//! Domain Entities
//!
//! Core business entities for the SIWE domain.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::message::SiweMessage;

/// PendingChallenge entity - the binding between an issued challenge
/// and a caller's server-side session
///
/// One binding per session; issuing a new challenge replaces the
/// previous one, and the binding is consumed on the first verification
/// attempt regardless of outcome.
#[derive(Debug, Clone)]
pub struct PendingChallenge {
    pub session_id: Uuid,
    pub nonce: String,
    /// Exact text the client was asked to sign, kept for telemetry
    pub message_text: String,
    pub created_at: DateTime<Utc>,
}

impl PendingChallenge {
    /// Bind an issued message to a session
    pub fn new(session_id: Uuid, message: &SiweMessage) -> Self {
        Self {
            session_id,
            nonce: message.nonce.as_str().to_string(),
            message_text: message.to_text(),
            created_at: Utc::now(),
        }
    }
}
