// Copyright (c) 2024 The Botho Foundation

//! Canonical `(r, s, v)` signature encoding.
//!
//! The encoded form is `0x || r (32 bytes) || s (32 bytes) || v`, where `r`
//! and `s` are big-endian and always padded to 32 bytes, and `v` is written as
//! the minimal hex of the integer with no zero padding.

use core::fmt;

use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};

use crate::{address_from_public_key, strip_hex_prefix, Error};

/// Width of a scalar component in bytes.
const COMPONENT_LEN: usize = 32;

/// Hex digits taken by `r || s`.
const RS_HEX_LEN: usize = 4 * COMPONENT_LEN;

/// Ethereum-style offset applied to the recovery id.
const V_OFFSET: u64 = 27;

/// A recoverable ECDSA signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Big-endian unsigned `r`.
    pub r: [u8; 32],
    /// Big-endian unsigned `s`.
    pub s: [u8; 32],
    /// Recovery id, usually offset by 27.
    pub v: u64,
}

impl Signature {
    /// Build a signature from big-endian components of any width up to 32
    /// significant bytes, left-padding with zeros.
    pub fn from_parts(r: &[u8], s: &[u8], v: u64) -> Result<Self, Error> {
        Ok(Self {
            r: left_pad(r, "r")?,
            s: left_pad(s, "s")?,
            v,
        })
    }

    /// Encode as `0x` + hex(r) + hex(s) + minimal hex(v).
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(2 + RS_HEX_LEN + 16);
        out.push_str("0x");
        out.push_str(&hex::encode(self.r));
        out.push_str(&hex::encode(self.s));
        out.push_str(&format!("{:x}", self.v));
        out
    }

    /// Parse the output of [`Signature::encode`]. The `0x` prefix is optional.
    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let digits = strip_hex_prefix(encoded);
        if digits.len() <= RS_HEX_LEN {
            return Err(Error::InvalidSignature(format!(
                "expected more than {} hex digits, got {}",
                RS_HEX_LEN,
                digits.len()
            )));
        }
        if !digits.is_ascii() {
            return Err(Error::InvalidSignature("non-hex characters".to_string()));
        }

        let (rs, v) = digits.split_at(RS_HEX_LEN);
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        hex::decode_to_slice(&rs[..2 * COMPONENT_LEN], &mut r)
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        hex::decode_to_slice(&rs[2 * COMPONENT_LEN..], &mut s)
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        // v is minimal lowercase hex: no sign, no zero padding
        let canonical = v.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            && (v.len() == 1 || !v.starts_with('0'));
        if !canonical {
            return Err(Error::InvalidSignature(format!(
                "recovery id {:?} is not minimal lowercase hex",
                v
            )));
        }
        let v = u64::from_str_radix(v, 16)
            .map_err(|e| Error::InvalidSignature(format!("bad recovery id: {}", e)))?;

        Ok(Self { r, s, v })
    }

    /// Get the 65-byte `r || s || v` form. Fails if `v` exceeds one byte.
    pub fn to_rsv_bytes(&self) -> Result<[u8; 65], Error> {
        let v = u8::try_from(self.v)
            .map_err(|_| Error::InvalidSignature(format!("v = {} does not fit in a byte", self.v)))?;

        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = v;
        Ok(out)
    }

    /// Recover the uncompressed public key that produced this signature over
    /// `hash`.
    pub fn recover_public_key(&self, hash: &[u8; 32]) -> Result<[u8; 65], Error> {
        // v is either 27/28 or a bare 0/1
        let raw = if self.v >= V_OFFSET {
            self.v - V_OFFSET
        } else {
            self.v
        };
        let recovery_id = u8::try_from(raw)
            .ok()
            .and_then(RecoveryId::from_byte)
            .ok_or_else(|| Error::InvalidSignature(format!("bad recovery id {}", self.v)))?;

        let sig = K256Signature::from_scalars(self.r, self.s)
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        let verifying_key = VerifyingKey::recover_from_prehash(hash, &sig, recovery_id)
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;

        let point = verifying_key.to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(point.as_bytes());
        Ok(result)
    }

    /// Recover the 20-byte address that produced this signature over `hash`.
    pub fn recover_address(&self, hash: &[u8; 32]) -> Result<[u8; 20], Error> {
        let public_key = self.recover_public_key(hash)?;
        Ok(address_from_public_key(&public_key))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Left-pad a big-endian integer to 32 bytes.
fn left_pad(value: &[u8], name: &str) -> Result<[u8; 32], Error> {
    let first_significant = value.iter().position(|b| *b != 0).unwrap_or(value.len());
    let significant = &value[first_significant..];
    if significant.len() > COMPONENT_LEN {
        return Err(Error::InvalidSignature(format!(
            "{} has {} significant bytes",
            name,
            significant.len()
        )));
    }

    let mut out = [0u8; 32];
    out[COMPONENT_LEN - significant.len()..].copy_from_slice(significant);
    Ok(out)
}
