//! Application Layer
//!
//! Use cases orchestrating the domain against the binding store.

pub mod config;
pub mod issue_challenge;
pub mod verify_signature;
