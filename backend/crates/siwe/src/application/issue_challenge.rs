//! Issue Challenge Use Case
//!
//! Builds a signable SIWE message for an account and binds its nonce to
//! the caller's session.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use uuid::Uuid;

use crate::application::config::SiweConfig;
use crate::domain::entities::PendingChallenge;
use crate::domain::message::{MessageOptions, SiweMessage};
use crate::domain::repository::ChallengeBindingRepository;
use crate::domain::value_objects::{EthAddress, Nonce};
use crate::error::{SiweError, SiweResult};

/// Input DTO for issue challenge
#[derive(Debug, Clone)]
pub struct IssueChallengeInput {
    pub session_id: Uuid,
    pub address: String,
    pub chain_id: u64,
}

/// Output DTO for issue challenge
#[derive(Debug, Clone)]
pub struct IssueChallengeOutput {
    /// Exact text the wallet must sign
    pub message_text: String,
    pub nonce: String,
}

/// Issue Challenge Use Case
pub struct IssueChallengeUseCase<C>
where
    C: ChallengeBindingRepository,
{
    binding_repo: Arc<C>,
    config: Arc<SiweConfig>,
}

impl<C> IssueChallengeUseCase<C>
where
    C: ChallengeBindingRepository,
{
    pub fn new(binding_repo: Arc<C>, config: Arc<SiweConfig>) -> Self {
        Self {
            binding_repo,
            config,
        }
    }

    pub async fn execute(&self, input: IssueChallengeInput) -> SiweResult<IssueChallengeOutput> {
        let address = EthAddress::parse(&input.address).ok_or_else(|| {
            SiweError::InvalidInput("address must be a 0x-prefixed 20-byte identifier".to_string())
        })?;

        // Exactly one nonce per issued challenge
        let nonce = Nonce::generate();
        let issued_at = Utc::now();

        let options = MessageOptions {
            statement: self.config.statement.clone(),
            expiration_time: self
                .config
                .expiration_offset
                .map(|offset| issued_at + ChronoDuration::seconds(offset.as_secs() as i64)),
            not_before: self
                .config
                .not_before_offset
                .map(|offset| issued_at + ChronoDuration::seconds(offset.as_secs() as i64)),
            request_id: self
                .config
                .include_request_id
                .then(|| Uuid::new_v4().to_string()),
            resources: self.config.resources.clone(),
        };

        let message = SiweMessage::new(
            self.config.domain.clone(),
            address,
            self.config.uri.clone(),
            input.chain_id,
            nonce,
            issued_at,
            options,
        )?;

        // Replaces any still-pending challenge for this session
        let binding = PendingChallenge::new(input.session_id, &message);
        self.binding_repo.store(&binding).await?;

        tracing::info!(
            session_id = %input.session_id,
            address = %message.address,
            chain_id = input.chain_id,
            "Issued sign-in challenge"
        );

        Ok(IssueChallengeOutput {
            message_text: binding.message_text,
            nonce: binding.nonce,
        })
    }
}
