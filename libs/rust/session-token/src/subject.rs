//! Anonymous subject generation.
//!
//! Produces short stand-in identifiers for callers without an account.
//! These are NOT security-grade identifiers.

use rand::Rng;

/// Characters used for generated subjects.
pub const SUBJECT_ALPHABET: &[u8] = b"1234567890abcdefghijklmnopqrstuvwxyz";

/// Default generated subject length.
pub const DEFAULT_SUBJECT_LEN: usize = 8;

/// Generate a random subject of `len` characters using the thread RNG.
#[must_use]
pub fn random_subject(len: usize) -> String {
    random_subject_with(&mut rand::thread_rng(), len)
}

/// Generate a random subject of `len` characters from `rng`.
pub fn random_subject_with<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(SUBJECT_ALPHABET[rng.gen_range(0..SUBJECT_ALPHABET.len())]))
        .collect()
}
