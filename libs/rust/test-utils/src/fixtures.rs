//! Reference tokens with known inputs.
//!
//! All vectors are signed with [`REFERENCE_SECRET`]. Legacy vectors were
//! produced by the session manager that predates the HMAC scheme.

/// Secret used by every reference vector.
pub const REFERENCE_SECRET: &str = "s3cr3t";

/// A token with known inputs and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceToken {
    /// Subject the token asserts
    pub subject: &'static str,
    /// Time the token was issued, in seconds since the Unix epoch
    pub issued_at: u64,
    /// Lifetime in seconds, `None` for non-expiring tokens
    pub max_age: Option<u64>,
    /// Digest truncation length, `None` for the full digest
    pub digest_length: Option<usize>,
    /// Token produced with HMAC-SHA256
    pub hmac_token: &'static str,
    /// Token produced with the legacy suffix-hash scheme
    pub legacy_token: &'static str,
}

impl ReferenceToken {
    /// Expiry embedded in the token.
    #[must_use]
    pub fn expires_at(&self) -> Option<u64> {
        self.max_age.map(|age| self.issued_at + age)
    }
}

/// One hour token for `user-42` with a 16 byte digest.
pub const USER_42_HOUR: ReferenceToken = ReferenceToken {
    subject: "user-42",
    issued_at: 1_700_000_000,
    max_age: Some(3600),
    digest_length: Some(16),
    hmac_token: "dXNlci00Mi0xNzAwMDAzNjAwJqoNj4v0LgWFJmHEYsT-Mg==",
    legacy_token: "dXNlci00Mi0xNzAwMDAzNjAweunwx4r7OIzypy0c19Q90A==",
};

/// Default thirty day token for a subject containing spaces and a quote.
pub const DEMO_USER_MONTH: ReferenceToken = ReferenceToken {
    subject: "My user's id",
    issued_at: 1_700_000_000,
    max_age: Some(2_592_000),
    digest_length: Some(16),
    hmac_token: "TXkgdXNlcidzIGlkLTE3MDI1OTIwMDD_WqbZHQ5lTeJTBRdNBK_0",
    legacy_token: "TXkgdXNlcidzIGlkLTE3MDI1OTIwMDAxoAAecNdKrR5-CRIo9MP5",
};

/// Anonymous-style subject with an 8 byte digest.
pub const ANONYMOUS_SHORT_DIGEST: ReferenceToken = ReferenceToken {
    subject: "a1b2c3d4",
    issued_at: 1_700_000_000,
    max_age: Some(3600),
    digest_length: Some(8),
    hmac_token: "YTFiMmMzZDQtMTcwMDAwMzYwMD0p_pjftkSJ",
    legacy_token: "YTFiMmMzZDQtMTcwMDAwMzYwMBCjWsmDurbY",
};

/// Non-expiring token with the full 32 byte digest.
pub const ADMIN_NO_EXPIRY: ReferenceToken = ReferenceToken {
    subject: "admin",
    issued_at: 1_700_000_000,
    max_age: None,
    digest_length: None,
    hmac_token: "YWRtaW7InjYSaGoJTGstaBrLvCAQ1DCnEhWLUVUKMqFoLIhWdA==",
    legacy_token: "YWRtaW5M1mlj1PE3a4PMGC84VYzH6Er0Ikyo15B9MZEyJlOE6w==",
};

/// All reference vectors.
pub const REFERENCE_TOKENS: [ReferenceToken; 4] = [
    USER_42_HOUR,
    DEMO_USER_MONTH,
    ANONYMOUS_SHORT_DIGEST,
    ADMIN_NO_EXPIRY,
];
