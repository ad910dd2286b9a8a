//! Session codec configuration.
//!
//! Configuration is an immutable value handed to the codec at construction.
//! It can be built in code or loaded from environment variables.

use crate::digest::{DigestScheme, FULL_DIGEST_LEN};
use crate::error::{SessionError, SessionResult};
use std::env;
use std::time::Duration;

/// Default token lifetime (30 days).
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Default digest truncation length in bytes.
pub const DEFAULT_DIGEST_LENGTH: usize = 16;

/// Session codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Token lifetime; `None` issues tokens that never expire
    pub max_age: Option<Duration>,
    /// Digest truncation length in bytes; `None` keeps the full digest
    pub digest_length: Option<usize>,
    /// Keyed digest construction
    pub scheme: DigestScheme,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_age: Some(DEFAULT_MAX_AGE),
            digest_length: Some(DEFAULT_DIGEST_LENGTH),
            scheme: DigestScheme::default(),
        }
    }
}

impl CodecConfig {
    /// Set the token lifetime.
    #[must_use]
    pub const fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Issue tokens without an expiry.
    #[must_use]
    pub const fn without_expiry(mut self) -> Self {
        self.max_age = None;
        self
    }

    /// Truncate digests to `len` bytes.
    #[must_use]
    pub const fn with_digest_length(mut self, len: usize) -> Self {
        self.digest_length = Some(len);
        self
    }

    /// Keep the full digest.
    #[must_use]
    pub const fn with_full_digest(mut self) -> Self {
        self.digest_length = None;
        self
    }

    /// Set the digest scheme.
    #[must_use]
    pub const fn with_scheme(mut self, scheme: DigestScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Number of digest bytes carried by every token.
    #[must_use]
    pub fn signature_len(&self) -> usize {
        self.digest_length.unwrap_or(FULL_DIGEST_LEN)
    }

    /// Lifetime in whole seconds, if tokens expire.
    #[must_use]
    pub fn max_age_secs(&self) -> Option<u64> {
        self.max_age.map(|age| age.as_secs())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the digest length is outside
    /// `1..=32` or the lifetime is shorter than one second.
    pub fn validate(&self) -> SessionResult<()> {
        if let Some(len) = self.digest_length {
            if len == 0 || len > FULL_DIGEST_LEN {
                return Err(SessionError::config(format!(
                    "digest length must be between 1 and {FULL_DIGEST_LEN} bytes, got {len}"
                )));
            }
        }
        if let Some(age) = self.max_age {
            if age.as_secs() == 0 {
                return Err(SessionError::config(
                    "max age must be at least one second; disable expiry instead",
                ));
            }
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Meaning | Default |
    /// |----------|---------|---------|
    /// | `SESSION_MAX_AGE` | lifetime in seconds, `0`/`none` disables expiry | 2592000 |
    /// | `SESSION_DIGEST_LENGTH` | digest bytes, `full` keeps all 32 | 16 |
    /// | `SESSION_DIGEST_SCHEME` | `hmac-sha256` or `suffix-sha256` | `hmac-sha256` |
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> SessionResult<Self> {
        dotenvy::dotenv().ok();

        let max_age = match env::var("SESSION_MAX_AGE") {
            Ok(val) if is_disabled(&val) => None,
            Ok(val) => {
                let secs: u64 = parse_value("SESSION_MAX_AGE", &val)?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            Err(_) => Some(DEFAULT_MAX_AGE),
        };

        let digest_length = match env::var("SESSION_DIGEST_LENGTH") {
            Ok(val) if val.trim().eq_ignore_ascii_case("full") => None,
            Ok(val) => Some(parse_value("SESSION_DIGEST_LENGTH", &val)?),
            Err(_) => Some(DEFAULT_DIGEST_LENGTH),
        };

        let scheme = match env::var("SESSION_DIGEST_SCHEME") {
            Ok(val) => val.trim().parse()?,
            Err(_) => DigestScheme::default(),
        };

        let config = Self {
            max_age,
            digest_length,
            scheme,
        };
        config.validate()?;
        Ok(config)
    }
}

fn is_disabled(val: &str) -> bool {
    let val = val.trim();
    val == "0" || val.eq_ignore_ascii_case("none")
}

/// Parse an environment value, naming the variable on failure.
fn parse_value<T: std::str::FromStr>(name: &str, val: &str) -> SessionResult<T>
where
    T::Err: std::fmt::Display,
{
    val.trim()
        .parse()
        .map_err(|e| SessionError::config(format!("Invalid {name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodecConfig::default();
        assert_eq!(config.max_age, Some(Duration::from_secs(2_592_000)));
        assert_eq!(config.digest_length, Some(16));
        assert_eq!(config.scheme, DigestScheme::HmacSha256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CodecConfig::default()
            .without_expiry()
            .with_full_digest()
            .with_scheme(DigestScheme::SuffixSha256);

        assert_eq!(config.max_age, None);
        assert_eq!(config.signature_len(), 32);
        assert_eq!(config.scheme, DigestScheme::SuffixSha256);
    }

    #[test]
    fn test_digest_length_bounds() {
        assert!(CodecConfig::default().with_digest_length(0).validate().is_err());
        assert!(CodecConfig::default().with_digest_length(33).validate().is_err());
        assert!(CodecConfig::default().with_digest_length(1).validate().is_ok());
        assert!(CodecConfig::default().with_digest_length(32).validate().is_ok());
    }

    #[test]
    fn test_zero_max_age_rejected() {
        let config = CodecConfig::default().with_max_age(Duration::from_millis(500));
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));
    }

    #[test]
    fn test_disabled_values() {
        assert!(is_disabled("0"));
        assert!(is_disabled(" None "));
        assert!(!is_disabled("3600"));
    }

    #[test]
    fn test_parse_value_names_variable() {
        let err = parse_value::<u64>("SESSION_MAX_AGE", "soon").unwrap_err();
        assert!(err.to_string().contains("SESSION_MAX_AGE"));
        assert_eq!(parse_value::<u64>("X", " 42 ").unwrap(), 42);
    }
}
