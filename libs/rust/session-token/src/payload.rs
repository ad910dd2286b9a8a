//! Payload text codec.
//!
//! The signed payload is `"<subject>"` or `"<subject>-<expiry>"`. When an
//! expiry is expected, the last `-` always separates it, so subjects may
//! themselves contain dashes.

use crate::error::{SessionError, SessionResult, VerifyStage};

/// Separator between subject and expiry.
pub const EXPIRY_SEPARATOR: char = '-';

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Principal identifier
    pub subject: String,
    /// Expiry in seconds since the Unix epoch
    pub expires_at: Option<u64>,
}

impl Payload {
    /// Create a payload.
    #[must_use]
    pub fn new(subject: impl Into<String>, expires_at: Option<u64>) -> Self {
        Self {
            subject: subject.into(),
            expires_at,
        }
    }

    /// Render the payload text that gets signed.
    #[must_use]
    pub fn encode(&self) -> String {
        match self.expires_at {
            Some(exp) => format!("{}{EXPIRY_SEPARATOR}{exp}", self.subject),
            None => self.subject.clone(),
        }
    }

    /// Parse payload bytes whose signature has already been checked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MalformedToken`] if the bytes are not UTF-8
    /// or, when `with_expiry` is set, the expiry field is missing or not an
    /// integer.
    pub fn parse(bytes: &[u8], with_expiry: bool) -> SessionResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            SessionError::malformed(VerifyStage::ParsingPayload, format!("payload is not UTF-8: {e}"))
        })?;

        if !with_expiry {
            return Ok(Self::new(text, None));
        }

        let (subject, expiry) = text.rsplit_once(EXPIRY_SEPARATOR).ok_or_else(|| {
            SessionError::malformed(VerifyStage::ParsingPayload, "missing expiry field")
        })?;
        let expires_at = expiry.parse::<u64>().map_err(|e| {
            SessionError::malformed(
                VerifyStage::ParsingPayload,
                format!("unparsable expiry field: {e}"),
            )
        })?;

        Ok(Self::new(subject, Some(expires_at)))
    }
}
