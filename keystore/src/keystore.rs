// Copyright (c) 2024 The Botho Foundation

//! The single-account keystore
//!
//! A [`Keystore`] only exists once it holds a complete, consistent set of
//! credentials: it is produced either by [`Keystore::initialize`] (fresh
//! account), [`Keystore::from_mnemonic`] (restored phrase) or
//! [`Keystore::from_serialized`] (previously saved state). Secrets are kept
//! encrypted at all times and only decrypted on demand with the password.

use acct_crypto_secp256k1::{
    checksum_encode, derive_account, strip_hex_prefix, Secp256k1Keypair, Signature,
};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::entropy::mix_entropy;
use crate::error::{KeystoreError, Result};
use crate::{mnemonic, vault};

/// Length of a message digest accepted by [`Keystore::sign_message_hash`]
pub const MESSAGE_HASH_BYTES: usize = 32;

/// Wire/storage form of a keystore.
///
/// Serialized as camelCase JSON. The account identity is written under
/// `address`; `publicKey` is accepted on input for older blobs. A record
/// with neither field is rejected: the address cannot be recovered without
/// the password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedKeystore {
    /// Public account address
    #[serde(alias = "publicKey")]
    pub address: String,

    /// Encrypted private key hex
    pub encoded_private_key: String,

    /// Encrypted mnemonic phrase
    pub encoded_mnemonic: String,
}

/// Encrypted credentials for one account
#[derive(Clone, PartialEq, Eq)]
pub struct Keystore {
    address: String,
    encoded_private_key: String,
    encoded_mnemonic: String,
}

impl core::fmt::Debug for Keystore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keystore")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Keystore {
    /// Create a fresh account from caller entropy, encrypted under `password`.
    pub fn initialize(entropy: &str, password: &str) -> Result<Self> {
        Self::initialize_with_rng(entropy, password, &mut OsRng)
    }

    /// Create a fresh account drawing all randomness from `rng`.
    ///
    /// `rng` feeds both the entropy mixer and the salt/nonce generation of
    /// the encryption step.
    pub fn initialize_with_rng<R: RngCore + CryptoRng>(
        entropy: &str,
        password: &str,
        rng: &mut R,
    ) -> Result<Self> {
        let mixed = mix_entropy(entropy, rng);
        let phrase = mnemonic::generate(&mixed)?;

        // A generated phrase that fails its own checksum means the encoder is
        // broken; never hand out a keystore built from it.
        if !mnemonic::validate(&phrase) {
            return Err(KeystoreError::MnemonicChecksum);
        }

        let keystore = Self::from_valid_phrase(&phrase, password, rng)?;
        debug!(address = %keystore.address, "Initialized new keystore");
        Ok(keystore)
    }

    /// Restore an account from an existing BIP-39 phrase.
    pub fn from_mnemonic(phrase: &str, password: &str) -> Result<Self> {
        Self::from_mnemonic_with_rng(phrase, password, &mut OsRng)
    }

    /// Restore an account from an existing BIP-39 phrase, drawing salts and
    /// nonces from `rng`.
    pub fn from_mnemonic_with_rng<R: RngCore + CryptoRng>(
        phrase: &str,
        password: &str,
        rng: &mut R,
    ) -> Result<Self> {
        let normalized = Zeroizing::new(
            phrase
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(" "),
        );

        if !mnemonic::validate(&normalized) {
            return Err(KeystoreError::InvalidMnemonic(format!(
                "{} words failed BIP-39 validation",
                mnemonic::word_count(&normalized)
            )));
        }

        let keystore = Self::from_valid_phrase(&normalized, password, rng)?;
        debug!(address = %keystore.address, "Restored keystore from mnemonic");
        Ok(keystore)
    }

    /// Derive the account for a validated phrase and encrypt its secrets.
    fn from_valid_phrase<R: RngCore + CryptoRng>(
        phrase: &str,
        password: &str,
        rng: &mut R,
    ) -> Result<Self> {
        let seed = mnemonic::to_seed(phrase)?;
        let account = derive_account(&seed[..])?;

        Ok(Self {
            encoded_private_key: vault::encrypt_with_rng(&account.private_key, password, rng)?,
            encoded_mnemonic: vault::encrypt_with_rng(phrase, password, rng)?,
            address: account.address,
        })
    }

    /// Restore a keystore from its serialized JSON form.
    ///
    /// Ciphertexts are taken as-is; a wrong password or corrupt blob only
    /// surfaces on the first decrypt.
    pub fn from_serialized(serialized: &str) -> Result<Self> {
        let record: SerializedKeystore = serde_json::from_str(serialized)?;
        let keystore = Self::from_serialized_record(record);
        debug!(address = %keystore.address, "Loaded serialized keystore");
        Ok(keystore)
    }

    /// Restore a keystore from an already-parsed record.
    pub fn from_serialized_record(record: SerializedKeystore) -> Self {
        Self {
            address: record.address,
            encoded_private_key: record.encoded_private_key,
            encoded_mnemonic: record.encoded_mnemonic,
        }
    }

    /// Serialize the keystore to JSON.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_serialized())?)
    }

    /// Get the storage record for this keystore.
    pub fn to_serialized(&self) -> SerializedKeystore {
        SerializedKeystore {
            address: self.address.clone(),
            encoded_private_key: self.encoded_private_key.clone(),
            encoded_mnemonic: self.encoded_mnemonic.clone(),
        }
    }

    /// The account address (lowercase, `0x`-prefixed).
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The account address with EIP-55 mixed-case checksum.
    pub fn checksum_address(&self) -> Result<String> {
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(strip_hex_prefix(&self.address), &mut bytes).map_err(|e| {
            KeystoreError::InvalidInput(format!("stored address is not 20 hex bytes: {}", e))
        })?;
        Ok(checksum_encode(&bytes))
    }

    /// Decrypt the private key hex.
    pub fn get_private_key(&self, password: &str) -> Result<Zeroizing<String>> {
        vault::decrypt(&self.encoded_private_key, password)
    }

    /// Decrypt the mnemonic phrase.
    pub fn get_mnemonic(&self, password: &str) -> Result<Zeroizing<String>> {
        vault::decrypt(&self.encoded_mnemonic, password)
    }

    /// Sign a 32-byte message digest given as hex (with or without `0x`).
    ///
    /// The caller hashes the message; this signs the digest as-is.
    pub fn sign_message_hash(&self, message_hash: &str, password: &str) -> Result<Signature> {
        let hash = parse_message_hash(message_hash)?;

        let private_key = self.get_private_key(password)?;
        let keypair = Secp256k1Keypair::from_private_key_hex(&private_key)?;
        let signature = keypair.sign_hash(&hash)?;

        debug!(address = %self.address, "Signed message hash");
        Ok(signature)
    }

    /// Re-encrypt both secrets under a new password.
    ///
    /// Returns a new keystore; `self` keeps its old ciphertexts.
    pub fn with_new_password(&self, old_password: &str, new_password: &str) -> Result<Self> {
        self.with_new_password_with_rng(old_password, new_password, &mut OsRng)
    }

    /// Re-encrypt both secrets under a new password, drawing salts and nonces
    /// from `rng`.
    pub fn with_new_password_with_rng<R: RngCore + CryptoRng>(
        &self,
        old_password: &str,
        new_password: &str,
        rng: &mut R,
    ) -> Result<Self> {
        let private_key = self.get_private_key(old_password)?;
        let phrase = self.get_mnemonic(old_password)?;

        let rotated = Self {
            address: self.address.clone(),
            encoded_private_key: vault::encrypt_with_rng(&private_key, new_password, rng)?,
            encoded_mnemonic: vault::encrypt_with_rng(&phrase, new_password, rng)?,
        };
        debug!(address = %self.address, "Rotated keystore password");
        Ok(rotated)
    }
}

/// Decode a hex message digest, which must be exactly 32 bytes.
fn parse_message_hash(message_hash: &str) -> Result<[u8; MESSAGE_HASH_BYTES]> {
    let bytes = hex::decode(strip_hex_prefix(message_hash))
        .map_err(|e| KeystoreError::InvalidInput(format!("message hash is not hex: {}", e)))?;

    bytes.as_slice().try_into().map_err(|_| {
        KeystoreError::InvalidInput(format!(
            "message hash must be {} bytes, got {}",
            MESSAGE_HASH_BYTES,
            bytes.len()
        ))
    })
}
