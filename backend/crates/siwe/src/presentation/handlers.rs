//! HTTP Handlers

use crate::application::config::SiweConfig;
use crate::application::issue_challenge::{IssueChallengeInput, IssueChallengeUseCase};
use crate::application::verify_signature::{VerifySignatureInput, VerifySignatureUseCase};
use crate::domain::repository::ChallengeBindingRepository;
use crate::error::{SiweError, SiweResult};
use crate::presentation::dto::{MessageRequest, MessageResponse, SignatureRequest, VerifiedResponse};
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

/// Shared state for SIWE handlers
#[derive(Clone)]
pub struct SiweAppState<R>
where
    R: ChallengeBindingRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<SiweConfig>,
}

/// POST /api/siwe/message
///
/// Issues a signable message bound to the caller's session. A session
/// cookie is minted if the caller does not already carry one; reissuing
/// for an existing session replaces the pending challenge.
pub async fn issue_message<R>(
    State(state): State<SiweAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<MessageRequest>,
) -> SiweResult<impl IntoResponse>
where
    R: ChallengeBindingRepository + Clone + Send + Sync + 'static,
{
    let session_id = extract_session_id(&headers, &state.config).unwrap_or_else(Uuid::new_v4);

    let use_case = IssueChallengeUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(IssueChallengeInput {
            session_id,
            address: req.eth_account,
            chain_id: req.chain_id,
        })
        .await?;

    // Refresh the cookie lifetime on every issuance
    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&session_id.to_string());

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: output.message_text,
            nonce: output.nonce,
        }),
    ))
}

/// POST /api/siwe/signature
///
/// Verifies a signed message against the session's pending challenge.
pub async fn verify_signature<R>(
    State(state): State<SiweAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<SignatureRequest>,
) -> SiweResult<Json<VerifiedResponse>>
where
    R: ChallengeBindingRepository + Clone + Send + Sync + 'static,
{
    // No session cookie means no challenge was ever issued to this caller
    let session_id =
        extract_session_id(&headers, &state.config).ok_or(SiweError::NoPendingChallenge)?;

    let use_case = VerifySignatureUseCase::new(state.repo.clone(), state.config.clone());

    let identity = use_case
        .execute(VerifySignatureInput {
            session_id,
            message_text: req.message,
            signature: req.signature,
            display_name: req.ens,
        })
        .await?;

    Ok(Json(VerifiedResponse {
        address: identity.address,
        ens: identity.display_name,
    }))
}

fn extract_session_id(headers: &HeaderMap, config: &SiweConfig) -> Option<Uuid> {
    platform::cookie::extract_cookie(headers, &config.session_cookie_name)
        .and_then(|value| Uuid::parse_str(&value).ok())
}
