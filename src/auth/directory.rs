//! User directory: persistence of user records keyed by provider subject id

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, error, info};

use super::errors::AuthError;
use super::models::{NewUser, User};
use crate::common::{generate_user_id, safe_email_log};

pub const GOOGLE_PROVIDER: &str = "google";

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("created user {0} could not be read back")]
    MissingAfterInsert(String),
}

impl DirectoryError {
    /// The record collided with an existing one on a unique key
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DirectoryError::Database(sqlx::Error::Database(db)) if db.is_unique_violation())
    }

    /// Recognized processing-failure signatures.
    ///
    /// Integrity and decoding problems are failures of processing the record;
    /// connectivity, pool exhaustion and the like are left unclassified.
    pub fn is_processing_failure(&self) -> bool {
        match self {
            DirectoryError::MissingAfterInsert(_) => true,
            DirectoryError::Database(e) => match e {
                sqlx::Error::Database(db) => db.is_unique_violation(),
                sqlx::Error::ColumnDecode { .. }
                | sqlx::Error::ColumnNotFound(_)
                | sqlx::Error::Decode(_)
                | sqlx::Error::TypeNotFound { .. } => true,
                _ => false,
            },
        }
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        if err.is_processing_failure() {
            AuthError::ProcessingFailure(err.to_string())
        } else {
            AuthError::Fault(err.into())
        }
    }
}

/// The two directory operations the authentication core consumes
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_provider_subject_id(
        &self,
        subject_id: &str,
    ) -> Result<Option<User>, DirectoryError>;

    async fn create(&self, new_user: NewUser) -> Result<User, DirectoryError>;
}

/// SQLite-backed user directory
pub struct SqliteUserDirectory {
    db: SqlitePool,
}

impl SqliteUserDirectory {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Used by `/api/me`; not part of the authentication flows
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, DirectoryError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn find_by_provider_subject_id(
        &self,
        subject_id: &str,
    ) -> Result<Option<User>, DirectoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE provider = ? AND provider_id = ?",
        )
        .bind(GOOGLE_PROVIDER)
        .bind(subject_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                provider = GOOGLE_PROVIDER,
                provider_id = %subject_id,
                "Database error looking up user by provider id"
            );
            e
        })?;

        debug!(
            provider = GOOGLE_PROVIDER,
            provider_id = %subject_id,
            found = user.is_some(),
            "User lookup by provider id"
        );
        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DirectoryError> {
        let id = generate_user_id();

        // No OR IGNORE: a concurrent duplicate must surface as a unique violation
        sqlx::query(
            "INSERT INTO users (id, email, name, avatar, provider, provider_id) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(new_user.avatar.as_deref())
        .bind(GOOGLE_PROVIDER)
        .bind(&new_user.provider_subject_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                user_id = %id,
                email = %safe_email_log(&new_user.email),
                provider = GOOGLE_PROVIDER,
                "Database error inserting new user"
            );
            e
        })?;

        let user = self
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DirectoryError::MissingAfterInsert(id.clone()))?;

        info!(
            user_id = %user.id,
            email = %safe_email_log(&user.email),
            provider = GOOGLE_PROVIDER,
            "New user account created"
        );
        Ok(user)
    }
}
