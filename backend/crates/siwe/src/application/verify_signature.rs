//! Verify Signature Use Case
//!
//! Evaluates a signed SIWE message against the session's pending
//! challenge. Checks run in a fixed order and short-circuit on first
//! failure; the binding is consumed on the first attempt regardless of
//! outcome, so no nonce can be tried twice.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::application::config::SiweConfig;
use crate::domain::message::SiweMessage;
use crate::domain::repository::ChallengeBindingRepository;
use crate::error::{SiweError, SiweResult};

/// Input DTO for verify signature
#[derive(Debug, Clone)]
pub struct VerifySignatureInput {
    pub session_id: Uuid,
    /// The exact text that was signed
    pub message_text: String,
    /// 65-byte r || s || v signature, hex with optional 0x prefix
    pub signature: String,
    /// Cosmetic ENS-style display name, carried through unverified
    pub display_name: Option<String>,
}

/// A successfully verified sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Checksum-normalized account address
    pub address: String,
    /// Display name supplied by the caller, never validated
    pub display_name: Option<String>,
}

/// Verify Signature Use Case
pub struct VerifySignatureUseCase<C>
where
    C: ChallengeBindingRepository,
{
    binding_repo: Arc<C>,
    config: Arc<SiweConfig>,
}

impl<C> VerifySignatureUseCase<C>
where
    C: ChallengeBindingRepository,
{
    pub fn new(binding_repo: Arc<C>, config: Arc<SiweConfig>) -> Self {
        Self {
            binding_repo,
            config,
        }
    }

    pub async fn execute(&self, input: VerifySignatureInput) -> SiweResult<VerifiedIdentity> {
        // 1. Structural validation. The re-serialization must reproduce
        //    the submitted bytes exactly, otherwise the text is not
        //    something this server's canonical form can have produced.
        let message = SiweMessage::parse(&input.message_text)?;
        if message.to_text() != input.message_text {
            return Err(SiweError::MalformedMessage {
                field: "non-canonical text",
            });
        }

        // 2. Consume the binding. This happens exactly once per attempt
        //    and burns the challenge even if a later step fails.
        let binding = self
            .binding_repo
            .take(input.session_id)
            .await?
            .ok_or(SiweError::NoPendingChallenge)?;

        // 3. Nonce must be the one issued to this session
        if message.nonce.as_str() != binding.nonce {
            return Err(SiweError::NonceMismatch);
        }

        // 4. Domain must be this server
        if message.domain != self.config.domain {
            return Err(SiweError::DomainMismatch);
        }

        // 5. Temporal window
        let now = Utc::now();
        if message.is_not_yet_valid_at(now) {
            return Err(SiweError::NotYetValid);
        }
        if message.is_expired_at(now) {
            return Err(SiweError::Expired);
        }

        // 6. Recover the signer over the exact signed bytes and compare
        //    against the declared account
        let signature = decode_signature(&input.signature)?;
        let recovered = platform::crypto::recover_address(input.message_text.as_bytes(), &signature)?;
        if &recovered != message.address.as_bytes() {
            return Err(SiweError::InvalidSignature(
                "recovered address does not match the message address".to_string(),
            ));
        }

        let address = message.address.to_checksum();
        tracing::info!(
            session_id = %input.session_id,
            address = %address,
            "Sign-in verification successful"
        );

        Ok(VerifiedIdentity {
            address,
            display_name: input.display_name,
        })
    }
}

/// Decode a 65-byte hex signature, 0x prefix optional
fn decode_signature(signature: &str) -> SiweResult<Vec<u8>> {
    let hex_sig = signature.strip_prefix("0x").unwrap_or(signature);
    if hex_sig.len() != 130 {
        return Err(SiweError::InvalidSignature(format!(
            "expected 130 hex characters, got {}",
            hex_sig.len()
        )));
    }
    hex::decode(hex_sig).map_err(|e| SiweError::InvalidSignature(e.to_string()))
}
