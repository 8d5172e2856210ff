use std::fmt;
use std::str::FromStr;

use auth::Role;
use auth::TokenSubject;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::errors::DisplayNameError;
use crate::domain::identity::errors::EmailError;
use crate::domain::identity::errors::IdentityIdError;

/// Identity aggregate entity.
///
/// Represents a registered account including its password hash. Never leaves
/// the service in this form; responses use [`SafeIdentityView`].
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Project to the view that is safe to return and hand downstream.
    pub fn to_safe_view(&self) -> SafeIdentityView {
        SafeIdentityView {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Identity snapshot embedded in access tokens.
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id.to_string(),
            email: self.email.as_str().to_string(),
            name: self.display_name.as_str().to_string(),
            role: self.role,
        }
    }
}

/// Identity projection without the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeIdentityView {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity fields supplied by the service on insert.
///
/// Timestamps are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password_hash: String,
    pub role: Role,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    ///
    /// # Returns
    /// IdentityId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored and compared
/// exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Non-empty after trimming, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if name.trim().is_empty() {
            return Err(DisplayNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to self-register a new identity
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub password: String,
    pub requested_role: Option<Role>,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `display_name` - Validated display name
    /// * `password` - Plain text password (checked against the policy and hashed by service)
    /// * `requested_role` - Role asked for by the client, if any
    pub fn new(
        email: EmailAddress,
        display_name: DisplayName,
        password: String,
        requested_role: Option<Role>,
    ) -> Self {
        Self {
            email,
            display_name,
            password,
            requested_role,
        }
    }
}

/// Command to authenticate with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Command to update an existing identity with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Role is not updatable here.
#[derive(Debug, Default)]
pub struct UpdateIdentityCommand {
    pub email: Option<EmailAddress>,
    pub display_name: Option<DisplayName>,
    pub password: Option<String>,
}

/// Access token handed back by a successful login.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_in_seconds: i64,
}
