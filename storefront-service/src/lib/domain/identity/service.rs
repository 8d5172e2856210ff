use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::PasswordPolicy;
use auth::Role;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthToken;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::SafeIdentityView;
use crate::domain::identity::models::UpdateIdentityCommand;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::ports::IdentityRepository;

/// Check a password against the strength policy.
///
/// Shared by registration, owner provisioning and password changes.
pub fn ensure_password_strength(password: &str) -> Result<(), IdentityError> {
    PasswordPolicy::validate(password)
        .into_result()
        .map_err(IdentityError::WeakPassword)
}

/// Domain service implementation for authentication and identity operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> AuthService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn ensure_email_available(&self, email: &EmailAddress) -> Result<(), IdentityError> {
        match self.repository.find_by_email(email.as_str()).await? {
            Some(_) => Err(IdentityError::DuplicateEmail),
            None => Ok(()),
        }
    }

    /// Hash on the blocking pool so slow hashing never stalls the runtime.
    async fn hash_password(&self, password: String) -> Result<String, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);
        let hash = tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await??;
        Ok(hash)
    }

    async fn create_identity(
        &self,
        email: EmailAddress,
        display_name: DisplayName,
        password: String,
        role: Role,
    ) -> Result<SafeIdentityView, IdentityError> {
        ensure_password_strength(&password)?;
        self.ensure_email_available(&email).await?;

        let password_hash = self.hash_password(password).await?;

        // The repository's unique constraint still decides concurrent races
        let identity = self
            .repository
            .insert(NewIdentity {
                id: IdentityId::new(),
                email,
                display_name,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(identity_id = %identity.id, role = %identity.role, "Identity created");

        Ok(identity.to_safe_view())
    }
}

#[async_trait]
impl<IR> AuthServicePort for AuthService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<SafeIdentityView, IdentityError> {
        if command.requested_role == Some(Role::Owner) {
            tracing::warn!("Rejected self-registration requesting the owner role");
            return Err(IdentityError::RoleEscalationDenied);
        }

        self.create_identity(
            command.email,
            command.display_name,
            command.password,
            Role::Guest,
        )
        .await
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthToken, IdentityError> {
        let identity = self
            .repository
            .find_by_email_with_secret(&command.email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let subject = identity.token_subject();
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = identity.password_hash;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, subject)
        })
        .await?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => IdentityError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => IdentityError::Password(err),
            AuthenticationError::JwtError(err) => IdentityError::Token(err),
        })?;

        tracing::info!(identity_id = %identity.id, "Access token issued");

        Ok(AuthToken {
            access_token: result.access_token,
            expires_in_seconds: self.authenticator.token_ttl_seconds(),
        })
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<SafeIdentityView, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|identity| identity.to_safe_view())
            .ok_or(IdentityError::NotFound(id.to_string()))
    }

    async fn update_identity(
        &self,
        id: &IdentityId,
        command: UpdateIdentityCommand,
    ) -> Result<SafeIdentityView, IdentityError> {
        let mut identity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != identity.email {
                self.ensure_email_available(&new_email).await?;
                identity.email = new_email;
            }
        }

        if let Some(new_display_name) = command.display_name {
            identity.display_name = new_display_name;
        }

        if let Some(new_password) = command.password {
            ensure_password_strength(&new_password)?;
            identity.password_hash = self.hash_password(new_password).await?;
        }

        let updated = self.repository.update(identity).await?;
        tracing::info!(identity_id = %updated.id, "Identity updated");

        Ok(updated.to_safe_view())
    }

    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityError> {
        self.repository.delete(id).await?;
        tracing::info!(identity_id = %id, "Identity deleted");
        Ok(())
    }

    async fn provision_owner(
        &self,
        email: EmailAddress,
        display_name: DisplayName,
        password: String,
    ) -> Result<SafeIdentityView, IdentityError> {
        self.create_identity(email, display_name, password, Role::Owner)
            .await
    }
}
