use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::SafeIdentityView;
use crate::domain::identity::ports::IdentityRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "identities_email_key";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    email: String,
    display_name: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = IdentityError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: IdentityId(row.id),
            email: EmailAddress::new(row.email)?,
            display_name: DisplayName::new(row.display_name)?,
            password_hash: row.password_hash,
            role: parse_role(&row.role)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row for the default projection; the hash column is never selected.
#[derive(sqlx::FromRow)]
struct SafeIdentityRow {
    id: Uuid,
    email: String,
    display_name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SafeIdentityRow> for SafeIdentityView {
    type Error = IdentityError;

    fn try_from(row: SafeIdentityRow) -> Result<Self, Self::Error> {
        Ok(SafeIdentityView {
            id: IdentityId(row.id),
            email: EmailAddress::new(row.email)?,
            display_name: DisplayName::new(row.display_name)?,
            role: parse_role(&row.role)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_role(value: &str) -> Result<Role, IdentityError> {
    value
        .parse::<Role>()
        .map_err(|e| IdentityError::InvalidRole(e.to_string()))
}

fn map_write_error(err: sqlx::Error) -> IdentityError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
            return IdentityError::DuplicateEmail;
        }
    }
    IdentityError::DatabaseError(err.to_string())
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<SafeIdentityView>, IdentityError> {
        let row = sqlx::query_as::<_, SafeIdentityRow>(
            r#"
            SELECT id, email, display_name, role, created_at, updated_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(SafeIdentityView::try_from).transpose()
    }

    async fn find_by_email_with_secret(
        &self,
        email: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, email, display_name, password_hash, role, created_at, updated_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(Identity::try_from).transpose()
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, email, display_name, password_hash, role, created_at, updated_at
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(Identity::try_from).transpose()
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO identities (id, email, display_name, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, display_name, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.email.as_str())
        .bind(identity.display_name.as_str())
        .bind(&identity.password_hash)
        .bind(identity.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Identity::try_from(row)
    }

    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            UPDATE identities
            SET email = $2, display_name = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, display_name, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.email.as_str())
        .bind(identity.display_name.as_str())
        .bind(&identity.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        match row {
            Some(row) => Identity::try_from(row),
            None => Err(IdentityError::NotFound(identity.id.to_string())),
        }
    }

    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            DELETE FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
