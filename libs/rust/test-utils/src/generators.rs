//! Shared proptest generators for session token tests.

use proptest::prelude::*;

/// Generate subject identifiers, dashes included.
pub fn subject_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_.@-]{1,64}",
        "user-[0-9]{1,10}",
        "[a-z0-9]{8}",
    ]
}

/// Generate subjects over arbitrary Unicode, including the empty string.
pub fn unicode_subject_strategy() -> impl Strategy<Value = String> {
    "\\PC{0,32}"
}

/// Generate signing secrets, including the empty secret.
pub fn secret_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// Generate pairs of distinct non-empty secrets.
pub fn distinct_secrets_strategy() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (
        prop::collection::vec(any::<u8>(), 1..64),
        prop::collection::vec(any::<u8>(), 1..64),
    )
        .prop_filter("secrets must differ", |(a, b)| a != b)
}

/// Generate lifetimes in seconds (1 minute to 90 days), or `None`.
pub fn max_age_secs_strategy() -> impl Strategy<Value = Option<u64>> {
    prop::option::of(60u64..(90 * 24 * 3600))
}

/// Generate digest truncation lengths (1 to 32 bytes), or `None` for full.
pub fn digest_length_strategy() -> impl Strategy<Value = Option<usize>> {
    prop::option::of(1usize..=32)
}

/// Generate issue timestamps between 2001 and 2096.
pub fn issued_at_strategy() -> impl Strategy<Value = u64> {
    1_000_000_000u64..4_000_000_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_subject_strategy_non_empty() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let subject = subject_strategy().new_tree(&mut runner).unwrap().current();
            assert!(!subject.is_empty());
        }
    }

    #[test]
    fn test_distinct_secrets_differ() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let (a, b) = distinct_secrets_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_digest_length_in_range() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            if let Some(len) = digest_length_strategy()
                .new_tree(&mut runner)
                .unwrap()
                .current()
            {
                assert!((1..=32).contains(&len));
            }
        }
    }
}
