//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router wiring for the SIWE endpoints.

pub mod dto;
pub mod handlers;
pub mod router;
