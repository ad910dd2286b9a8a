//! Keyed digest schemes and constant-time comparison.

use crate::error::SessionError;
use ring::hmac;
use sha2::{Digest, Sha256};
use std::str::FromStr;
use subtle::ConstantTimeEq;

/// Output length of every supported scheme, in bytes.
pub const FULL_DIGEST_LEN: usize = 32;

/// Keyed digest construction used to sign payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestScheme {
    /// HMAC with SHA-256
    #[default]
    HmacSha256,
    /// SHA-256 over `payload ‖ secret`.
    ///
    /// Not a proper MAC construction. Only for reading and issuing tokens
    /// shared with legacy deployments.
    SuffixSha256,
}

impl DigestScheme {
    /// Scheme name used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HmacSha256 => "hmac-sha256",
            Self::SuffixSha256 => "suffix-sha256",
        }
    }

    /// Compute the full, untruncated digest of `payload` under `secret`.
    #[must_use]
    pub fn compute(&self, secret: &[u8], payload: &[u8]) -> [u8; FULL_DIGEST_LEN] {
        let mut out = [0u8; FULL_DIGEST_LEN];
        match self {
            Self::HmacSha256 => {
                let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
                let tag = hmac::sign(&key, payload);
                out.copy_from_slice(tag.as_ref());
            }
            Self::SuffixSha256 => {
                let mut hasher = Sha256::new();
                hasher.update(payload);
                hasher.update(secret);
                out.copy_from_slice(&hasher.finalize());
            }
        }
        out
    }
}

impl FromStr for DigestScheme {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hmac-sha256" | "hmac" => Ok(Self::HmacSha256),
            "suffix-sha256" | "legacy" => Ok(Self::SuffixSha256),
            _ => Err(SessionError::config(format!("Invalid digest scheme: {s}"))),
        }
    }
}

/// Compare two digests without short-circuiting on the first difference.
///
/// A length mismatch returns early; lengths are fixed by configuration and
/// carry no secret information.
#[must_use]
pub fn secure_compare(computed: &[u8], presented: &[u8]) -> bool {
    if computed.len() != presented.len() {
        return false;
    }
    computed.ct_eq(presented).into()
}
