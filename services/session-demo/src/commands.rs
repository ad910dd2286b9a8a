//! Demo commands.

use anyhow::{Result, bail};
use serde::Serialize;
use session_token::{SessionCodec, SessionError};
use tracing::info;

/// Command selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Issue a token, read it back, then show a tampered copy being rejected
    Demo {
        /// Subject for the demo token
        subject: String,
    },
    /// Issue a token; `None` generates an anonymous subject
    Issue {
        /// Subject to assert
        subject: Option<String>,
    },
    /// Verify a token
    Verify {
        /// Token text
        token: String,
    },
}

/// Subject used by the demo command.
pub const DEMO_SUBJECT: &str = "My user's id";

const USAGE: &str = "usage: session-demo [demo [SUBJECT] | issue [SUBJECT] | verify TOKEN]";

impl Command {
    /// Parse arguments, excluding the program name.
    ///
    /// # Errors
    ///
    /// Returns a usage error for unknown commands or missing arguments.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let command = args.next();
        let operand = args.next();
        if args.next().is_some() {
            bail!("too many arguments\n{USAGE}");
        }

        match command.as_deref() {
            None | Some("demo") => Ok(Self::Demo {
                subject: operand.unwrap_or_else(|| DEMO_SUBJECT.to_string()),
            }),
            Some("issue") => Ok(Self::Issue { subject: operand }),
            Some("verify") => match operand {
                Some(token) => Ok(Self::Verify { token }),
                None => bail!("verify needs a token\n{USAGE}"),
            },
            Some(other) => bail!("unknown command: {other}\n{USAGE}"),
        }
    }
}

/// Output of the `issue` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IssueOutput {
    /// Issued token
    pub token: String,
    /// Subject the token asserts
    pub subject: String,
    /// Expiry in seconds since the Unix epoch
    pub expires_at: Option<u64>,
}

/// Output of the `verify` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VerifyOutput {
    /// Whether the token was accepted
    pub valid: bool,
    /// Recovered subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Expiry as RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Rejection code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    /// Rejection message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of the demo walkthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// Token issued for the demo subject
    pub token: String,
    /// Subject recovered from the token
    pub recovered: String,
    /// Token with its last character replaced
    pub tampered: String,
    /// Why the tampered token was rejected, `None` if it was accepted
    pub tamper_error: Option<SessionError>,
}

/// Issue a token.
#[must_use]
pub fn issue(codec: &SessionCodec, subject: Option<&str>) -> IssueOutput {
    let issued = match subject {
        Some(subject) => codec.issue_session(subject),
        None => codec.issue_anonymous(),
    };
    info!(subject = %issued.subject, expires_at = issued.expires_at, "Issued token");
    IssueOutput {
        token: issued.token,
        subject: issued.subject,
        expires_at: issued.expires_at,
    }
}

/// Verify a token.
#[must_use]
pub fn verify(codec: &SessionCodec, token: &str) -> VerifyOutput {
    match codec.decode(token) {
        Ok(session) => VerifyOutput {
            valid: true,
            expires_at: session.expires_at_utc().map(|at| at.to_rfc3339()),
            subject: Some(session.subject),
            error_code: None,
            error: None,
        },
        Err(err) => VerifyOutput {
            valid: false,
            subject: None,
            expires_at: None,
            error_code: Some(err.code()),
            error: Some(err.to_string()),
        },
    }
}

/// Issue a token, read it back, and try a tampered copy.
///
/// # Errors
///
/// Returns an error if the freshly issued token fails verification.
pub fn demo(codec: &SessionCodec, subject: &str) -> Result<DemoReport> {
    let token = codec.issue(subject);
    let recovered = codec.verify(&token)?;
    let tampered = replace_last_char(&token, 'a');
    let tamper_error = codec.verify(&tampered).err();

    Ok(DemoReport {
        token,
        recovered,
        tampered,
        tamper_error,
    })
}

fn replace_last_char(token: &str, replacement: char) -> String {
    let mut out: String = token.chars().take(token.chars().count().saturating_sub(1)).collect();
    out.push(replacement);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse(Vec::<String>::new()).unwrap(),
            Command::Demo {
                subject: DEMO_SUBJECT.to_string()
            }
        );
        assert_eq!(
            Command::parse(["issue"]).unwrap(),
            Command::Issue { subject: None }
        );
        assert_eq!(
            Command::parse(["issue", "alice"]).unwrap(),
            Command::Issue {
                subject: Some("alice".to_string())
            }
        );
        assert_eq!(
            Command::parse(["verify", "abc"]).unwrap(),
            Command::Verify {
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse(["verify"]).is_err());
        assert!(Command::parse(["revoke", "x"]).is_err());
        assert!(Command::parse(["issue", "a", "b"]).is_err());
    }

    #[test]
    fn test_replace_last_char() {
        assert_eq!(replace_last_char("abc=", 'a'), "abca");
        assert_eq!(replace_last_char("", 'a'), "a");
    }
}
