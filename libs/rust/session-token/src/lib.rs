//! Stateless signed session tokens for Auth Platform.
//!
//! A token is `base64url(payload ‖ digest)`: the subject, an optional
//! absolute expiry, and a truncated keyed digest. The server needs only the
//! secret to verify it; there is no session store and therefore no
//! revocation.
//!
//! ```
//! use session_token::{CodecConfig, SessionCodec};
//!
//! let codec = SessionCodec::new("change-me", CodecConfig::default())?;
//! let token = codec.issue("user-42");
//! assert_eq!(codec.verify(&token)?, "user-42");
//! # Ok::<(), session_token::SessionError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod codec;
pub mod config;
pub mod digest;
pub mod error;
pub mod payload;
pub mod subject;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{IssuedSession, SessionCodec, VerifiedSession};
pub use config::CodecConfig;
pub use digest::DigestScheme;
pub use error::{RejectionKind, SessionError, SessionResult, VerifyStage};
