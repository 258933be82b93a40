use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::confirmation::models::ConfirmationTokenRecord;
use crate::domain::confirmation::ports::ConfirmationTokenRepository;
use crate::domain::errors::AuthError;

/// Postgres-backed confirmation token store.
pub struct PostgresConfirmationTokenRepository {
    pool: PgPool,
}

impl PostgresConfirmationTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfirmationTokenRepository for PostgresConfirmationTokenRepository {
    async fn insert(&self, record: ConfirmationTokenRecord) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO confirmation_tokens (token, email, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.token)
        .bind(&record.email)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::storage("insert confirmation token", e))?;

        Ok(())
    }

    async fn consume(&self, token: &str) -> Result<Option<ConfirmationTokenRecord>, AuthError> {
        // Delete-and-return makes consumption exactly-once: concurrent
        // confirmations of the same token see the row at most once.
        let row = sqlx::query(
            r#"
            DELETE FROM confirmation_tokens
            WHERE token = $1
            RETURNING token, email, expires_at
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::storage("consume confirmation token", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let token: String = row
            .try_get("token")
            .map_err(|e| AuthError::storage("read confirmation token row", e))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| AuthError::storage("read confirmation token row", e))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| AuthError::storage("read confirmation token row", e))?;

        Ok(Some(ConfirmationTokenRecord {
            token,
            email,
            expires_at,
        }))
    }
}
