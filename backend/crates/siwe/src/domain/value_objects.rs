//! Domain Value Objects
//!
//! Immutable value types for the SIWE domain.

use std::fmt;

/// Ethereum account address (20 bytes)
///
/// Case-insensitive on input; always rendered in EIP-55 checksum form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EthAddress([u8; 20]);

impl EthAddress {
    /// Parse a `0x`-prefixed 40-hex-digit address, any letter case
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
        if hex_part.len() != 40 {
            return None;
        }

        let raw = hex::decode(hex_part).ok()?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&raw);
        Some(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// EIP-55 mixed-case checksum rendering
    pub fn to_checksum(&self) -> String {
        platform::crypto::to_checksum_address(&self.0)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

/// Server-issued single-use challenge token
///
/// Alphanumeric, at least [`Nonce::MIN_LENGTH`] characters on input.
/// Generated nonces are [`Nonce::GENERATED_LENGTH`] characters, which
/// clears the 96-bit entropy bound over a 62-symbol alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(String);

impl Nonce {
    /// EIP-4361 minimum accepted on parse
    pub const MIN_LENGTH: usize = 8;
    /// 17 chars * log2(62) ~= 101 bits
    pub const GENERATED_LENGTH: usize = 17;

    /// Validate an incoming nonce token
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() >= Self::MIN_LENGTH && s.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Generate a fresh random nonce from the OS CSPRNG
    ///
    /// Aborts the process if secure randomness is unavailable rather
    /// than degrading to a weaker source.
    pub fn generate() -> Self {
        Self(platform::crypto::random_alphanumeric(Self::GENERATED_LENGTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
