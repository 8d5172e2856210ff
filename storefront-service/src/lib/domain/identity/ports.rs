use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthToken;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::SafeIdentityView;
use crate::domain::identity::models::UpdateIdentityCommand;

/// Port for registration, login and identity management.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Self-register a new identity. The stored role is always GUEST.
    ///
    /// # Arguments
    /// * `command` - Validated email and display name, raw password, requested role
    ///
    /// # Returns
    /// Safe view of the created identity
    ///
    /// # Errors
    /// * `RoleEscalationDenied` - OWNER was requested
    /// * `WeakPassword` - Password violates the policy
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<SafeIdentityView, IdentityError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthToken, IdentityError>;

    /// Retrieve identity by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_identity(&self, id: &IdentityId) -> Result<SafeIdentityView, IdentityError>;

    /// Partially update an identity. A new password is re-validated and re-hashed.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `WeakPassword` - New password violates the policy
    /// * `DuplicateEmail` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_identity(
        &self,
        id: &IdentityId,
        command: UpdateIdentityCommand,
    ) -> Result<SafeIdentityView, IdentityError>;

    /// Delete an identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityError>;

    /// Create an OWNER identity. Out-of-band provisioning only; never routed over HTTP.
    ///
    /// # Errors
    /// * `WeakPassword` - Password violates the policy
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn provision_owner(
        &self,
        email: EmailAddress,
        display_name: DisplayName,
        password: String,
    ) -> Result<SafeIdentityView, IdentityError>;
}

/// Persistence operations for the identity aggregate.
///
/// Implementations own email uniqueness: `insert` and `update` must fail with
/// `DuplicateEmail` when another identity already holds the email.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Look up by email, without the password hash.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<SafeIdentityView>, IdentityError>;

    /// Look up by email including the password hash. Only login uses this.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email_with_secret(&self, email: &str)
        -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Persist a new identity, stamping `created_at` and `updated_at`.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError>;

    /// Overwrite an existing identity, stamping `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DuplicateEmail` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Remove identity from storage.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError>;
}
