//! SIWE Router

use crate::application::config::SiweConfig;
use crate::domain::repository::ChallengeBindingRepository;
use crate::infra::postgres::PgChallengeRepository;
use crate::presentation::handlers::{self, SiweAppState};
use axum::{Router, routing::post};
use std::sync::Arc;

/// Create the SIWE router with PostgreSQL repository
pub fn siwe_router(repo: PgChallengeRepository, config: SiweConfig) -> Router {
    let state = SiweAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/message",
            post(handlers::issue_message::<PgChallengeRepository>),
        )
        .route(
            "/signature",
            post(handlers::verify_signature::<PgChallengeRepository>),
        )
        .with_state(state)
}

/// Create a generic SIWE router for any repository implementation
pub fn siwe_router_generic<R>(repo: R, config: SiweConfig) -> Router
where
    R: ChallengeBindingRepository + Clone + Send + Sync + 'static,
{
    let state = SiweAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/message", post(handlers::issue_message::<R>))
        .route("/signature", post(handlers::verify_signature::<R>))
        .with_state(state)
}
