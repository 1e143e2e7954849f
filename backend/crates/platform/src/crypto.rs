//! Cryptographic Utilities
//!
//! Keccak-256 hashing, EIP-191 personal-sign hashing, secp256k1 address
//! recovery and EIP-55 checksum encoding. Consumers treat these as an
//! opaque, already-correct boundary.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use rand::{Rng, RngCore, distributions::Alphanumeric, rngs::OsRng};
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// EIP-191 version 0x45 prefix for personal_sign payloads
const EIP191_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Errors from secp256k1 address recovery
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecoverError {
    /// Signature is not 65 bytes (r || s || v)
    #[error("signature must be 65 bytes, got {0}")]
    InvalidLength(usize),

    /// The v byte does not encode a usable recovery id
    #[error("invalid recovery id byte: {0}")]
    InvalidRecoveryId(u8),

    /// r/s do not form a valid secp256k1 signature
    #[error("malformed secp256k1 signature")]
    InvalidSignature,

    /// No public key could be recovered for this (hash, signature) pair
    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Generate cryptographically secure random bytes
///
/// Panics if the OS randomness source is unavailable; operation cannot
/// safely continue without entropy.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a random alphanumeric token of `len` characters
///
/// 62-symbol alphabet, ~5.95 bits per character. Panics if the OS
/// randomness source is unavailable.
pub fn random_alphanumeric(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Compute Keccak-256 hash
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the EIP-191 personal_sign digest of a message
///
/// Hashes `"\x19Ethereum Signed Message:\n" + byte-length + message`
/// with Keccak-256. This is the exact payload wallets sign for
/// `personal_sign` requests.
pub fn eip191_hash(message: &[u8]) -> [u8; 32] {
    let mut data = Vec::with_capacity(EIP191_PREFIX.len() + 20 + message.len());
    data.extend_from_slice(EIP191_PREFIX);
    data.extend_from_slice(message.len().to_string().as_bytes());
    data.extend_from_slice(message);
    keccak256(&data)
}

/// Recover the signing Ethereum address from a personal_sign signature
///
/// `signature` is the 65-byte `r || s || v` form; `v` is accepted as
/// 0/1 or 27/28.
pub fn recover_address(message: &[u8], signature: &[u8]) -> Result<[u8; 20], RecoverError> {
    if signature.len() != 65 {
        return Err(RecoverError::InvalidLength(signature.len()));
    }

    let recovery_id = RecoveryId::try_from(signature[64] % 27)
        .map_err(|_| RecoverError::InvalidRecoveryId(signature[64]))?;

    let sig =
        Signature::try_from(&signature[..64]).map_err(|_| RecoverError::InvalidSignature)?;

    let prehash = eip191_hash(message);
    let verifying_key = VerifyingKey::recover_from_prehash(&prehash, &sig, recovery_id)
        .map_err(|_| RecoverError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&verifying_key))
}

/// Derive the Ethereum address of a secp256k1 public key
///
/// Last 20 bytes of keccak256 over the uncompressed point without its
/// 0x04 prefix byte.
pub fn address_from_verifying_key(key: &VerifyingKey) -> [u8; 20] {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Encode a 20-byte address in EIP-55 mixed-case checksum form
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let hex_addr = hex::encode(address);
    let hash = keccak256(hex_addr.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    fn test_key() -> SigningKey {
        SigningKey::from_bytes(&[0x42u8; 32].into()).unwrap()
    }

    fn sign_personal(key: &SigningKey, message: &[u8]) -> [u8; 65] {
        let prehash = eip191_hash(message);
        let (sig, recid) = key.sign_prehash_recoverable(&prehash).unwrap();
        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&sig.to_bytes());
        bytes[64] = recid.to_byte() + 27;
        bytes
    }

    #[test]
    fn test_keccak256_known_values() {
        // Keccak-256 of empty string
        let hash = keccak256(b"");
        let expected =
            hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);

        // Keccak-256 of "hello world"
        let hash = keccak256(b"hello world");
        let expected =
            hex::decode("47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_eip191_prefix() {
        // eip191_hash("abc") == keccak256("\x19Ethereum Signed Message:\n3abc")
        let direct = keccak256(b"\x19Ethereum Signed Message:\n3abc");
        assert_eq!(eip191_hash(b"abc"), direct);
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_alphanumeric() {
        let token = random_alphanumeric(17);
        assert_eq!(token.len(), 17);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

        // Two draws colliding would mean broken randomness
        assert_ne!(random_alphanumeric(17), random_alphanumeric(17));
    }

    #[test]
    fn test_checksum_address_eip55_vectors() {
        let vectors = [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ];
        for expected in vectors {
            let raw = hex::decode(&expected[2..].to_lowercase()).unwrap();
            let mut address = [0u8; 20];
            address.copy_from_slice(&raw);
            assert_eq!(to_checksum_address(&address), expected);
        }
    }

    #[test]
    fn test_sign_recover_roundtrip() {
        let key = test_key();
        let expected = address_from_verifying_key(key.verifying_key());

        let message = b"example.com wants you to sign in with your Ethereum account:";
        let signature = sign_personal(&key, message);

        let recovered = recover_address(message, &signature).unwrap();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn test_recover_accepts_raw_recovery_id() {
        let key = test_key();
        let expected = address_from_verifying_key(key.verifying_key());

        let message = b"test message";
        let mut signature = sign_personal(&key, message);
        signature[64] -= 27; // v as 0/1 instead of 27/28

        let recovered = recover_address(message, &signature).unwrap();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn test_recover_rejects_bad_input() {
        assert_eq!(
            recover_address(b"msg", &[0u8; 64]),
            Err(RecoverError::InvalidLength(64))
        );
        assert!(recover_address(b"msg", &[0u8; 65]).is_err());
    }

    #[test]
    fn test_tampered_signature_recovers_different_address() {
        let key = test_key();
        let expected = address_from_verifying_key(key.verifying_key());

        let message = b"test message";
        let mut signature = sign_personal(&key, message);
        signature[3] ^= 0x01;

        match recover_address(message, &signature) {
            Ok(address) => assert_ne!(address, expected),
            Err(_) => {} // recovery failing outright is acceptable too
        }
    }
}
