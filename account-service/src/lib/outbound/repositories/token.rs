use std::sync::Arc;

use async_trait::async_trait;
use auth::IdCodec;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::models::AccountId;
use crate::domain::errors::AuthError;
use crate::domain::token::models::RefreshToken;
use crate::domain::token::models::RefreshTokenId;
use crate::domain::token::models::REFRESH_TOKENS_PER_ACCOUNT_LIMIT;
use crate::domain::token::ports::RefreshTokenRepository;

/// Postgres-backed refresh token store.
///
/// Holds two codecs: the account codec decodes client-supplied account
/// ids, the token codec encodes the ids this store hands out. The
/// per-account cap is enforced inside each insert transaction, so the
/// invariant holds across concurrent service instances sharing the
/// database.
pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
    account_codec: Arc<IdCodec>,
    token_codec: Arc<IdCodec>,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool, account_codec: Arc<IdCodec>, token_codec: Arc<IdCodec>) -> Self {
        Self {
            pool,
            account_codec,
            token_codec,
        }
    }

    fn token_from_row(&self, row: &PgRow) -> Result<RefreshToken, AuthError> {
        let internal_id: i64 = row
            .try_get("id")
            .map_err(|e| AuthError::storage("read refresh token row", e))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::storage("read refresh token row", e))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| AuthError::storage("read refresh token row", e))?;

        Ok(RefreshToken {
            id: RefreshTokenId(self.token_codec.encode(internal_id)),
            created_at,
            expires_at,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn list(&self, account_id: &AccountId) -> Result<Vec<RefreshToken>, AuthError> {
        let internal_account_id = self.account_codec.decode(account_id.as_str())?;

        let rows = sqlx::query(
            r#"
            SELECT id, created_at, expires_at
            FROM refresh_tokens
            WHERE account_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(internal_account_id)
        .bind(REFRESH_TOKENS_PER_ACCOUNT_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::storage("list refresh tokens", e))?;

        rows.iter().map(|row| self.token_from_row(row)).collect()
    }

    async fn add(
        &self,
        account_id: &AccountId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError> {
        let internal_account_id = self.account_codec.decode(account_id.as_str())?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AuthError::storage("add refresh token", e))?;

        // Serialize inserts for one account for the rest of this
        // transaction. At READ COMMITTED two concurrent eviction scans
        // would each run against their own snapshot, miss the other's
        // insert, and jointly push the account past the cap. Rotation
        // needs no lock: it is count-neutral.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(internal_account_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AuthError::storage("add refresh token", e))?;

        // Evict the oldest excess tokens so the count including the new
        // insert never exceeds the cap; ties broken by insertion order.
        sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE id IN (
                SELECT id
                FROM refresh_tokens
                WHERE account_id = $1
                ORDER BY created_at DESC, id DESC
                OFFSET $2
            )
            "#,
        )
        .bind(internal_account_id)
        .bind((REFRESH_TOKENS_PER_ACCOUNT_LIMIT - 1) as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| AuthError::storage("evict refresh tokens", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (account_id, created_at, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, created_at, expires_at
            "#,
        )
        .bind(internal_account_id)
        .bind(created_at)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AuthError::storage("add refresh token", e))?;

        let token = self.token_from_row(&row)?;

        tx.commit()
            .await
            .map_err(|e| AuthError::storage("add refresh token", e))?;

        Ok(token)
    }

    async fn replace(
        &self,
        token_id: &RefreshTokenId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError> {
        let internal_token_id = self.token_codec.decode(token_id.as_str())?;

        // Delete and re-insert in one statement; the account association
        // carries over from the consumed row.
        let row = sqlx::query(
            r#"
            WITH old AS (
                DELETE FROM refresh_tokens
                WHERE id = $1
                RETURNING account_id
            )
            INSERT INTO refresh_tokens (account_id, created_at, expires_at)
            SELECT account_id, $2, $3 FROM old
            RETURNING id, created_at, expires_at
            "#,
        )
        .bind(internal_token_id)
        .bind(created_at)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::storage("replace refresh token", e))?;

        match row {
            Some(row) => self.token_from_row(&row),
            None => Err(AuthError::NotFound(token_id.to_string())),
        }
    }

    async fn delete(&self, token_id: &RefreshTokenId) -> Result<RefreshTokenId, AuthError> {
        let internal_token_id = self.token_codec.decode(token_id.as_str())?;

        let row = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(internal_token_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::storage("delete refresh token", e))?;

        match row {
            Some(row) => {
                let internal_id: i64 = row
                    .try_get("id")
                    .map_err(|e| AuthError::storage("delete refresh token", e))?;
                Ok(RefreshTokenId(self.token_codec.encode(internal_id)))
            }
            None => Err(AuthError::NotFound(token_id.to_string())),
        }
    }

    async fn delete_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<RefreshTokenId>, AuthError> {
        let internal_account_id = self.account_codec.decode(account_id.as_str())?;

        let rows = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE account_id = $1
            RETURNING id
            "#,
        )
        .bind(internal_account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::storage("delete refresh tokens by account", e))?;

        rows.iter()
            .map(|row| {
                let internal_id: i64 = row
                    .try_get("id")
                    .map_err(|e| AuthError::storage("delete refresh tokens by account", e))?;
                Ok(RefreshTokenId(self.token_codec.encode(internal_id)))
            })
            .collect()
    }
}
