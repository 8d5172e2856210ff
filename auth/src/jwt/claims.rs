use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Identity data copied into a token at issuance time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// JWT claims carried by every access token.
///
/// The field set is closed: decoding rejects tokens with missing or unknown
/// fields instead of letting partial payloads through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Email at issuance time
    pub email: String,

    /// Display name at issuance time
    pub name: String,

    /// Role at issuance time
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject with an expiry window.
    ///
    /// # Arguments
    /// * `subject` - Identity snapshot to embed
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Validity window length
    ///
    /// # Returns
    /// Claims with `exp = iat + ttl`
    pub fn for_subject(subject: TokenSubject, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: subject.id,
            email: subject.email,
            name: subject.name,
            role: subject.role,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given instant.
    ///
    /// A token stops being valid at its `exp` second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Recover the subject snapshot.
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}
