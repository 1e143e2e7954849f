//! SIWE (Sign-In with Ethereum) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Message model, canonical text, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Security Model
//! - Backend is the sole authority for nonce generation, message text, and verification
//! - The wallet signs the exact bytes the server issued; verification re-serializes and
//!   requires byte equality before anything else is checked
//! - Challenge consumption is atomic (no nonce can be tried twice)
//! - Client-reported values (ENS display name) are cosmetic only, never trusted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SiweConfig;
pub use application::verify_signature::VerifiedIdentity;
pub use domain::message::SiweMessage;
pub use error::{SiweError, SiweResult};
pub use infra::memory::InMemoryChallengeRepository;
pub use infra::postgres::PgChallengeRepository;
pub use presentation::router::{siwe_router, siwe_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
