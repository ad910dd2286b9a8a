//! Centralized configuration for the session demo.
//!
//! All configuration is loaded from environment variables. Codec settings
//! use the variables documented on [`CodecConfig::from_env`].

use crate::observability::TracingConfig;
use anyhow::Result;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use session_token::{CodecConfig, SessionCodec};
use std::env;
use tracing::warn;

/// Demo configuration.
#[derive(Debug)]
pub struct Config {
    /// Signing secret
    pub secret: SecretString,
    /// Whether the secret was generated because `SESSION_SECRET` was unset
    pub secret_generated: bool,
    /// Codec settings
    pub codec: CodecConfig,
    /// Logging settings
    pub tracing: TracingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a codec variable is present but invalid.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let (secret, secret_generated) = match env::var("SESSION_SECRET") {
            Ok(secret) => (SecretString::from(secret), false),
            Err(_) => (generate_secret(), true),
        };

        Ok(Self {
            secret,
            secret_generated,
            codec: CodecConfig::from_env()?,
            tracing: TracingConfig::from_env(),
        })
    }

    /// Build a codec from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec settings are invalid.
    pub fn build_codec(&self) -> Result<SessionCodec> {
        if self.secret_generated {
            warn!("SESSION_SECRET not set, using a random secret; tokens will not survive a restart");
        }
        let secret = self.secret.expose_secret().as_bytes().to_vec();
        Ok(SessionCodec::new(secret, self.codec.clone())?)
    }
}

/// Generate a random secret for development.
fn generate_secret() -> SecretString {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    SecretString::from(URL_SAFE_NO_PAD.encode(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secrets_differ() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a.expose_secret(), b.expose_secret());
        assert_eq!(a.expose_secret().len(), 43);
    }

    #[test]
    fn test_build_codec_round_trip() {
        let config = Config {
            secret: SecretString::from("demo-secret"),
            secret_generated: false,
            codec: CodecConfig::default(),
            tracing: TracingConfig::default(),
        };
        let codec = config.build_codec().unwrap();
        let token = codec.issue("alice");
        assert_eq!(codec.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config {
            secret: SecretString::from("demo-secret"),
            secret_generated: false,
            codec: CodecConfig::default(),
            tracing: TracingConfig::default(),
        };
        assert!(!format!("{config:?}").contains("demo-secret"));
    }
}
