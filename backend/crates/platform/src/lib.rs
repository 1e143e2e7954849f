//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (Keccak-256, EIP-191 hashing, secp256k1
//!   address recovery, EIP-55 checksum encoding, secure randomness)
//! - Cookie management

pub mod cookie;
pub mod crypto;
