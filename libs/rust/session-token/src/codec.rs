//! Session token issuing and verification.
//!
//! Wire form: `base64url(payload ‖ digest)` with padding, where `payload` is
//! the text produced by [`Payload::encode`] and `digest` is the keyed digest
//! of the payload truncated to the configured length.

use crate::clock::{Clock, SystemClock};
use crate::config::CodecConfig;
use crate::digest::secure_compare;
use crate::error::{SessionError, SessionResult, VerifyStage};
use crate::payload::Payload;
use crate::subject::{DEFAULT_SUBJECT_LEN, random_subject};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretSlice};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A freshly issued token together with what it asserts.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedSession {
    /// Opaque token string to hand to the client
    pub token: String,
    /// Subject the token asserts
    pub subject: String,
    /// Expiry in seconds since the Unix epoch
    pub expires_at: Option<u64>,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("token", &"[REDACTED]")
            .field("subject", &self.subject)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Claims recovered from an accepted token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    /// Subject the token asserts
    pub subject: String,
    /// Expiry in seconds since the Unix epoch
    pub expires_at: Option<u64>,
}

impl VerifiedSession {
    /// Expiry as a UTC timestamp.
    #[must_use]
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Issues and verifies signed session tokens.
///
/// The codec holds no mutable state; a single instance can be shared across
/// threads. Several codecs with different secrets may coexist.
pub struct SessionCodec {
    secret: SecretSlice<u8>,
    config: CodecConfig,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCodec")
            .field("secret", &"[REDACTED]")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionCodec {
    /// Create a codec signing with `secret`.
    ///
    /// The secret is not inspected; an empty secret produces tokens anyone
    /// can forge.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `config` fails validation.
    pub fn new(secret: impl Into<Vec<u8>>, config: CodecConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self {
            secret: SecretSlice::from(secret.into()),
            config,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Codec configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Issue a token for `subject`.
    #[must_use]
    pub fn issue(&self, subject: &str) -> String {
        self.issue_session(subject).token
    }

    /// Issue a token for a generated anonymous subject.
    #[must_use]
    pub fn issue_anonymous(&self) -> IssuedSession {
        self.issue_session(&random_subject(DEFAULT_SUBJECT_LEN))
    }

    /// Issue a token for `subject`, returning the token with its claims.
    #[must_use]
    pub fn issue_session(&self, subject: &str) -> IssuedSession {
        let expires_at = self
            .config
            .max_age_secs()
            .map(|age| self.clock.now_secs().saturating_add(age));
        let payload = Payload::new(subject, expires_at).encode();

        let signature = self.sign(payload.as_bytes());
        let mut raw = payload.into_bytes();
        raw.extend_from_slice(&signature);
        let token = URL_SAFE.encode(&raw);

        debug!(
            scheme = self.config.scheme.as_str(),
            expires_at,
            token_len = token.len(),
            "Issued session token"
        );

        IssuedSession {
            token,
            subject: subject.to_string(),
            expires_at,
        }
    }

    /// Verify `token` and return its subject.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MalformedToken`], [`SessionError::InvalidSignature`]
    /// or [`SessionError::Expired`]; see [`SessionCodec::decode`].
    pub fn verify(&self, token: &str) -> SessionResult<String> {
        self.decode(token).map(|session| session.subject)
    }

    /// Verify `token` and return its subject and expiry.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MalformedToken`] if the token is not valid padded
    ///   base64url, is shorter than the digest, or its payload is not UTF-8
    ///   or lacks a numeric expiry when one is expected
    /// - [`SessionError::InvalidSignature`] if the digest does not match
    /// - [`SessionError::Expired`] if the current time is past the expiry
    #[instrument(skip_all, fields(token_len = token.len()))]
    pub fn decode(&self, token: &str) -> SessionResult<VerifiedSession> {
        self.run_verification(token)
            .inspect(|session| {
                debug!(expires_at = session.expires_at, "Session token accepted");
            })
            .inspect_err(|err| {
                warn!(
                    code = err.code(),
                    stage = err.stage().map(|s| s.as_str()),
                    "Session token rejected"
                );
            })
    }

    fn run_verification(&self, token: &str) -> SessionResult<VerifiedSession> {
        let raw = URL_SAFE.decode(token).map_err(|e| {
            SessionError::malformed(VerifyStage::Decoding, format!("invalid base64url: {e}"))
        })?;

        let sig_len = self.config.signature_len();
        let split = raw.len().checked_sub(sig_len).ok_or_else(|| {
            SessionError::malformed(
                VerifyStage::SplittingSignature,
                format!("token holds {} bytes, digest needs {sig_len}", raw.len()),
            )
        })?;
        let (payload_bytes, signature) = raw.split_at(split);

        let expected = self.sign(payload_bytes);
        if !secure_compare(&expected, signature) {
            return Err(SessionError::InvalidSignature);
        }

        let payload = Payload::parse(payload_bytes, self.config.max_age.is_some())?;

        if let Some(expires_at) = payload.expires_at {
            if self.clock.now_secs() > expires_at {
                return Err(SessionError::Expired {
                    expired_at: expires_at,
                });
            }
        }

        Ok(VerifiedSession {
            subject: payload.subject,
            expires_at: payload.expires_at,
        })
    }

    /// Keyed digest of `payload`, truncated to the configured length.
    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let digest = self
            .config
            .scheme
            .compute(self.secret.expose_secret(), payload);
        digest[..self.config.signature_len()].to_vec()
    }
}
