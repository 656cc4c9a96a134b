// Copyright (c) 2024 The Botho Foundation

//! Password-based secret encryption
//!
//! Encrypts secret strings using:
//! - Argon2id for password-based key derivation
//! - ChaCha20-Poly1305 for authenticated encryption
//!
//! Each call produces a self-contained blob
//! `{version}:{salt}:{nonce}:{ciphertext}` carrying everything needed for
//! decryption except the password. A wrong password fails authentication
//! instead of producing garbage plaintext.

use argon2::{
    password_hash::{Salt, SaltString},
    Argon2,
};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{KeystoreError, Result};

/// Current blob format version
const VAULT_VERSION: u32 = 1;

/// Argon2 parameters (tuned for security vs. usability)
const ARGON2_MEMORY_KB: u32 = 65536; // 64 MB
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 4;

/// ChaCha20-Poly1305 key length
const KEY_LEN: usize = 32;

/// ChaCha20-Poly1305 nonce length
const NONCE_LEN: usize = 12;

/// Field separator within a blob
const SEPARATOR: char = ':';

/// Encrypt a secret under a password using the OS random source.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String> {
    encrypt_with_rng(plaintext, password, &mut OsRng)
}

/// Encrypt a secret under a password, drawing salt and nonce from `rng`.
pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
    plaintext: &str,
    password: &str,
    rng: &mut R,
) -> Result<String> {
    // Generate random salt for Argon2
    let salt = SaltString::generate(&mut *rng);

    // Derive encryption key from password
    let key = derive_key(password, &salt)?;

    // Generate random nonce
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);

    let cipher = ChaCha20Poly1305::new_from_slice(&key[..])
        .map_err(|_| KeystoreError::Encryption("failed to create cipher".to_string()))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| KeystoreError::Encryption("cipher rejected plaintext".to_string()))?;

    Ok(format!(
        "{}{sep}{}{sep}{}{sep}{}",
        VAULT_VERSION,
        salt.as_str(),
        hex::encode(nonce_bytes),
        hex::encode(ciphertext),
        sep = SEPARATOR,
    ))
}

/// Decrypt a blob produced by [`encrypt`].
pub fn decrypt(blob: &str, password: &str) -> Result<Zeroizing<String>> {
    let parts: Vec<&str> = blob.split(SEPARATOR).collect();
    let [version, salt, nonce_hex, ciphertext_hex] = parts.as_slice() else {
        return Err(KeystoreError::MalformedCiphertext(format!(
            "expected 4 fields, got {}",
            parts.len()
        )));
    };

    // Check version
    let version: u32 = version
        .parse()
        .map_err(|_| KeystoreError::MalformedCiphertext("invalid version".to_string()))?;
    if version != VAULT_VERSION {
        return Err(KeystoreError::MalformedCiphertext(format!(
            "unsupported version: {} (expected {})",
            version, VAULT_VERSION
        )));
    }

    let salt = SaltString::from_b64(salt)
        .map_err(|_| KeystoreError::MalformedCiphertext("invalid salt format".to_string()))?;

    // Decode nonce and ciphertext
    let nonce_bytes = hex::decode(nonce_hex)
        .map_err(|_| KeystoreError::MalformedCiphertext("invalid nonce format".to_string()))?;
    let ciphertext = hex::decode(ciphertext_hex)
        .map_err(|_| KeystoreError::MalformedCiphertext("invalid ciphertext format".to_string()))?;

    if nonce_bytes.len() != NONCE_LEN {
        return Err(KeystoreError::MalformedCiphertext(
            "invalid nonce length".to_string(),
        ));
    }

    // Derive key from password
    let key = derive_key(password, &salt)?;

    let cipher = ChaCha20Poly1305::new_from_slice(&key[..])
        .map_err(|_| KeystoreError::Encryption("failed to create cipher".to_string()))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(nonce, ciphertext.as_slice())
            .map_err(|_| KeystoreError::Decryption)?,
    );

    let text = core::str::from_utf8(&plaintext)
        .map_err(|_| KeystoreError::MalformedCiphertext("plaintext is not UTF-8".to_string()))?;
    Ok(Zeroizing::new(text.to_string()))
}

/// Derive a 32-byte encryption key from password using Argon2id
fn derive_key(password: &str, salt: &SaltString) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = argon2::Params::new(
        ARGON2_MEMORY_KB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(KEY_LEN),
    )
    .map_err(|_| KeystoreError::Encryption("invalid Argon2 parameters".to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut salt_buf = [0u8; Salt::MAX_LENGTH];
    let salt_bytes = salt
        .as_salt()
        .decode_b64(&mut salt_buf)
        .map_err(|_| KeystoreError::MalformedCiphertext("invalid salt format".to_string()))?;

    // Hash straight into the zeroizing buffer
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password.as_bytes(), salt_bytes, &mut key[..])
        .map_err(|_| KeystoreError::Encryption("key derivation failed".to_string()))?;

    Ok(key)
}
