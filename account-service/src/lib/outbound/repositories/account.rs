use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use auth::IdCodec;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountName;
use crate::domain::account::models::AccountType;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::ports::AccountRepository;
use crate::domain::errors::AuthError;

/// Postgres-backed account store.
///
/// Internal bigserial keys never leave this adapter: every identifier is
/// encoded with the account codec before it crosses the port boundary.
pub struct PostgresAccountRepository {
    pool: PgPool,
    codec: Arc<IdCodec>,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool, codec: Arc<IdCodec>) -> Self {
        Self { pool, codec }
    }

    fn account_from_row(&self, row: &PgRow) -> Result<Account, AuthError> {
        let internal_id: i64 = row
            .try_get("id")
            .map_err(|e| AuthError::storage("read account row", e))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| AuthError::storage("read account row", e))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| AuthError::storage("read account row", e))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AuthError::storage("read account row", e))?;
        let account_type: String = row
            .try_get("account_type")
            .map_err(|e| AuthError::storage("read account row", e))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::storage("read account row", e))?;

        Ok(Account {
            id: AccountId(self.codec.encode(internal_id)),
            name: AccountName::new(name)?,
            email: EmailAddress::new(email)?,
            password_hash,
            account_type: AccountType::from_str(&account_type)?,
            created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts (name, email, password_hash, account_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.account_type.as_str())
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("accounts_email_key")
                {
                    return AuthError::EmailInUse(account.email.to_string());
                }
            }
            AuthError::storage("create account", e)
        })?;

        let internal_id: i64 = row
            .try_get("id")
            .map_err(|e| AuthError::storage("create account", e))?;

        Ok(Account {
            id: AccountId(self.codec.encode(internal_id)),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            account_type: account.account_type,
            created_at: account.created_at,
        })
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, account_type, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::storage("find account by email", e))?;

        match row {
            Some(row) => Ok(Some(self.account_from_row(&row)?)),
            None => Ok(None),
        }
    }
}
