//! Session token error types using thiserror 2.0.
//!
//! Every verification failure is terminal. Callers should deny access for
//! all rejection kinds alike and use [`SessionError::code`] only to tell them
//! apart in logs.

use std::fmt;
use thiserror::Error;

/// Stage of the verification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerifyStage {
    /// Base64url decoding of the token text
    Decoding,
    /// Separating payload bytes from the trailing digest
    SplittingSignature,
    /// Recomputing and comparing the digest
    VerifyingSignature,
    /// UTF-8 decoding and field extraction
    ParsingPayload,
    /// Comparing the embedded expiry with the clock
    CheckingExpiry,
}

impl VerifyStage {
    /// Stage name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decoding => "decoding",
            Self::SplittingSignature => "splitting_signature",
            Self::VerifyingSignature => "verifying_signature",
            Self::ParsingPayload => "parsing_payload",
            Self::CheckingExpiry => "checking_expiry",
        }
    }
}

impl fmt::Display for VerifyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// Token could not be decoded or parsed
    Malformed,
    /// Digest did not match
    InvalidSignature,
    /// Embedded expiry is in the past
    Expired,
}

/// Session token errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Token is not a well-formed session token
    #[error("Malformed session token ({stage}): {reason}")]
    MalformedToken {
        /// Pipeline stage that rejected the token
        stage: VerifyStage,
        /// Human readable reason
        reason: String,
    },

    /// Token was altered or signed with a different secret
    #[error("Invalid session token signature")]
    InvalidSignature,

    /// Signature is valid but the token is past its expiry
    #[error("Session token expired at {expired_at}")]
    Expired {
        /// Expiry as seconds since the Unix epoch
        expired_at: u64,
    },

    /// Codec configuration is invalid
    #[error("Invalid session codec configuration: {0}")]
    Config(String),
}

/// Result type for session token operations.
pub type SessionResult<T> = Result<T, SessionError>;

// Stable error codes for logs and API responses
/// Code for [`SessionError::MalformedToken`].
pub const SESSION_TOKEN_MALFORMED: &str = "SESSION_TOKEN_MALFORMED";
/// Code for [`SessionError::InvalidSignature`].
pub const SESSION_TOKEN_INVALID_SIGNATURE: &str = "SESSION_TOKEN_INVALID_SIGNATURE";
/// Code for [`SessionError::Expired`].
pub const SESSION_TOKEN_EXPIRED: &str = "SESSION_TOKEN_EXPIRED";
/// Code for [`SessionError::Config`].
pub const SESSION_CONFIG_INVALID: &str = "SESSION_CONFIG_INVALID";

impl SessionError {
    /// Create a malformed token error.
    #[must_use]
    pub fn malformed(stage: VerifyStage, reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            stage,
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Rejection kind, or `None` for configuration errors.
    #[must_use]
    pub const fn kind(&self) -> Option<RejectionKind> {
        match self {
            Self::MalformedToken { .. } => Some(RejectionKind::Malformed),
            Self::InvalidSignature => Some(RejectionKind::InvalidSignature),
            Self::Expired { .. } => Some(RejectionKind::Expired),
            Self::Config(_) => None,
        }
    }

    /// Check if this error rejects a presented token.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        self.kind().is_some()
    }

    /// Stable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedToken { .. } => SESSION_TOKEN_MALFORMED,
            Self::InvalidSignature => SESSION_TOKEN_INVALID_SIGNATURE,
            Self::Expired { .. } => SESSION_TOKEN_EXPIRED,
            Self::Config(_) => SESSION_CONFIG_INVALID,
        }
    }

    /// Stage at which verification stopped, if this is a rejection.
    #[must_use]
    pub const fn stage(&self) -> Option<VerifyStage> {
        match self {
            Self::MalformedToken { stage, .. } => Some(*stage),
            Self::InvalidSignature => Some(VerifyStage::VerifyingSignature),
            Self::Expired { .. } => Some(VerifyStage::CheckingExpiry),
            Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::malformed(VerifyStage::Decoding, "invalid base64");
        assert_eq!(
            err.to_string(),
            "Malformed session token (decoding): invalid base64"
        );

        let err = SessionError::Expired {
            expired_at: 1_700_003_600,
        };
        assert_eq!(err.to_string(), "Session token expired at 1700003600");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SessionError::malformed(VerifyStage::ParsingPayload, "x").code(),
            SESSION_TOKEN_MALFORMED
        );
        assert_eq!(
            SessionError::InvalidSignature.code(),
            SESSION_TOKEN_INVALID_SIGNATURE
        );
        assert_eq!(
            SessionError::Expired { expired_at: 0 }.code(),
            SESSION_TOKEN_EXPIRED
        );
        assert_eq!(SessionError::config("bad").code(), SESSION_CONFIG_INVALID);
    }

    #[test]
    fn test_rejection_classification() {
        assert!(SessionError::InvalidSignature.is_rejection());
        assert!(SessionError::Expired { expired_at: 1 }.is_rejection());
        assert!(!SessionError::config("digest length").is_rejection());
        assert_eq!(
            SessionError::InvalidSignature.kind(),
            Some(RejectionKind::InvalidSignature)
        );
    }

    #[test]
    fn test_stage_for_each_kind() {
        assert_eq!(
            SessionError::InvalidSignature.stage(),
            Some(VerifyStage::VerifyingSignature)
        );
        assert_eq!(
            SessionError::Expired { expired_at: 1 }.stage(),
            Some(VerifyStage::CheckingExpiry)
        );
        assert_eq!(
            SessionError::malformed(VerifyStage::SplittingSignature, "short").stage(),
            Some(VerifyStage::SplittingSignature)
        );
        assert_eq!(SessionError::config("x").stage(), None);
    }
}
