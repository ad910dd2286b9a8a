//! Integration tests for demo commands.

use session_demo::commands::{self, DEMO_SUBJECT};
use session_token::{CodecConfig, ManualClock, SessionCodec, SessionError};
use std::sync::Arc;
use std::time::Duration;
use test_utils::fixtures::{DEMO_USER_MONTH, REFERENCE_SECRET, USER_42_HOUR};

fn reference_codec(now: u64) -> SessionCodec {
    SessionCodec::new(REFERENCE_SECRET, CodecConfig::default())
        .unwrap()
        .with_clock(Arc::new(ManualClock::new(now)))
}

#[test]
fn test_demo_walkthrough() {
    let codec = reference_codec(DEMO_USER_MONTH.issued_at);
    let report = commands::demo(&codec, DEMO_SUBJECT).unwrap();

    assert_eq!(report.token, DEMO_USER_MONTH.hmac_token);
    assert_eq!(report.recovered, DEMO_SUBJECT);
    assert_ne!(report.tampered, report.token);
    assert!(matches!(
        report.tamper_error,
        Some(SessionError::InvalidSignature | SessionError::MalformedToken { .. })
    ));
}

#[test]
fn test_issue_anonymous() {
    let codec = reference_codec(1_700_000_000);
    let output = commands::issue(&codec, None);

    assert_eq!(output.subject.len(), 8);
    assert_eq!(output.expires_at, Some(1_700_000_000 + 2_592_000));
    assert_eq!(codec.verify(&output.token).unwrap(), output.subject);
}

#[test]
fn test_verify_output_json() {
    let codec = SessionCodec::new(
        REFERENCE_SECRET,
        CodecConfig::default().with_max_age(Duration::from_secs(3600)),
    )
    .unwrap()
    .with_clock(Arc::new(ManualClock::new(USER_42_HOUR.issued_at + 1)));

    let output = commands::verify(&codec, USER_42_HOUR.hmac_token);
    assert!(output.valid);

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["subject"], "user-42");
    assert_eq!(json["expires_at"], "2023-11-14T23:13:20+00:00");
    assert!(json.get("error_code").is_none());
}

#[test]
fn test_verify_rejection_output() {
    let codec = reference_codec(1_700_000_000);
    let output = commands::verify(&codec, "garbage!");

    assert!(!output.valid);
    assert_eq!(output.error_code, Some("SESSION_TOKEN_MALFORMED"));
    assert!(output.subject.is_none());
}
