//! Infrastructure Layer
//!
//! Repository implementations backing the challenge binding store.

pub mod memory;
pub mod postgres;
