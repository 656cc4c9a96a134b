// Copyright (c) 2024 The Botho Foundation

#![deny(unsafe_code)]

//! Single-account software keystore.
//!
//! Generates a mnemonic-backed secp256k1 account, keeps its private key and
//! mnemonic encrypted under a user password, round-trips through a JSON
//! storage form, and signs 32-byte digests.
//!
//! ## Pipeline
//!
//! ```text
//! entropy ──► mix_entropy ──► mnemonic::generate ──► mnemonic::to_seed
//!                                                          │
//!                          vault::encrypt ◄── derive_account (m/44'/60'/0'/0/0)
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use acct_keystore::Keystore;
//!
//! let keystore = Keystore::initialize("some caller entropy", "password").unwrap();
//! let saved = keystore.serialize().unwrap();
//!
//! let restored = Keystore::from_serialized(&saved).unwrap();
//! let signature = restored
//!     .sign_message_hash(&format!("0x{}", "11".repeat(32)), "password")
//!     .unwrap();
//! println!("{}", signature.encode());
//! ```

pub mod entropy;
pub mod error;
pub mod keystore;
pub mod mnemonic;
pub mod vault;

pub use acct_crypto_secp256k1::Signature;
pub use entropy::mix_entropy;
pub use error::{KeystoreError, Result};
pub use keystore::{Keystore, SerializedKeystore, MESSAGE_HASH_BYTES};
