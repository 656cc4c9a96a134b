// Copyright (c) 2024 The Botho Foundation

//! Keystore error types

use thiserror::Error;

/// Result type for keystore operations
pub type Result<T> = core::result::Result<T, KeystoreError>;

/// Errors that can occur while creating, restoring or using a keystore
#[derive(Debug, Error)]
pub enum KeystoreError {
    /// Caller input failed validation (e.g. a message hash of the wrong length)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A freshly generated mnemonic failed its own checksum
    #[error("generated mnemonic failed checksum validation")]
    MnemonicChecksum,

    /// A supplied mnemonic is not a valid BIP-39 phrase
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    /// Serialized keystore text could not be parsed or produced
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Seed or private key could not be turned into an account
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// Encryption of a secret failed
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Authentication failed while decrypting a secret
    #[error("decryption failed - wrong password?")]
    Decryption,

    /// Ciphertext blob is not in the expected format
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// The signing primitive rejected the request
    #[error("signing failed: {0}")]
    Signing(String),
}

impl From<serde_json::Error> for KeystoreError {
    fn from(err: serde_json::Error) -> Self {
        KeystoreError::Serialization(err.to_string())
    }
}

impl From<acct_crypto_secp256k1::Error> for KeystoreError {
    fn from(err: acct_crypto_secp256k1::Error) -> Self {
        use acct_crypto_secp256k1::Error as KeyError;

        match err {
            KeyError::SigningError(msg) => KeystoreError::Signing(msg),
            other => KeystoreError::Derivation(other.to_string()),
        }
    }
}
