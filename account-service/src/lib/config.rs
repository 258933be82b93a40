use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::errors::AuthError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub kafka: KafkaConfig,
    pub email: EmailConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    #[serde(default)]
    pub brokers: String,
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub confirmation_path: String,
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
    #[serde(default = "default_confirmation_ttl_hours")]
    pub confirmation_ttl_hours: i64,
}

/// Salts, keys, and token lifetimes.
///
/// The three salts are independent: one per identifier kind plus the
/// password pepper. The keypair signs access and refresh tokens.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub account_id_salt: String,
    #[serde(default)]
    pub token_id_salt: String,
    #[serde(default)]
    pub password_salt: String,
    #[serde(default)]
    pub public_key_pem: String,
    #[serde(default)]
    pub private_key_pem: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_send_timeout_secs() -> u64 {
    5
}

fn default_confirmation_ttl_hours() -> i64 {
    1
}

fn default_access_token_ttl_minutes() -> i64 {
    15
}

fn default_refresh_token_ttl_days() -> i64 {
    30
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__ACCOUNT_ID_SALT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Check that every required value is present.
    ///
    /// Reports all missing fields at once so a misconfigured deployment
    /// fails with one complete message instead of one field at a time.
    ///
    /// # Errors
    /// * `Configuration` - Lists every missing field
    pub fn validate(&self) -> Result<(), AuthError> {
        let required = [
            ("database.url", &self.database.url),
            ("kafka.brokers", &self.kafka.brokers),
            ("kafka.topic", &self.kafka.topic),
            ("email.smtp_host", &self.email.smtp_host),
            ("email.smtp_username", &self.email.smtp_username),
            ("email.smtp_password", &self.email.smtp_password),
            ("email.from_address", &self.email.from_address),
            ("email.confirmation_path", &self.email.confirmation_path),
            ("auth.account_id_salt", &self.auth.account_id_salt),
            ("auth.token_id_salt", &self.auth.token_id_salt),
            ("auth.password_salt", &self.auth.password_salt),
            ("auth.public_key_pem", &self.auth.public_key_pem),
            ("auth.private_key_pem", &self.auth.private_key_pem),
        ];

        let missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AuthError::Configuration(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/accounts".to_string(),
            },
            kafka: KafkaConfig {
                brokers: "localhost:9092".to_string(),
                topic: "account-notifications".to_string(),
            },
            email: EmailConfig {
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 587,
                smtp_username: "sender".to_string(),
                smtp_password: "secret".to_string(),
                from_address: "noreply@example.com".to_string(),
                confirmation_path: "/api/v1/users/confirm".to_string(),
                send_timeout_secs: 5,
                confirmation_ttl_hours: 1,
            },
            auth: AuthConfig {
                account_id_salt: "account-salt".to_string(),
                token_id_salt: "token-salt".to_string(),
                password_salt: "password-salt".to_string(),
                public_key_pem: "---pub---".to_string(),
                private_key_pem: "---priv---".to_string(),
                access_token_ttl_minutes: 15,
                refresh_token_ttl_days: 30,
            },
        }
    }

    #[test]
    fn test_validate_full_config() {
        assert!(full_config().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_all_missing_fields_at_once() {
        let mut config = full_config();
        config.auth.account_id_salt = String::new();
        config.auth.private_key_pem = "  ".to_string();
        config.kafka.brokers = String::new();

        let err = config.validate().unwrap_err();
        match err {
            AuthError::Configuration(missing) => {
                assert_eq!(
                    missing,
                    vec![
                        "kafka.brokers".to_string(),
                        "auth.account_id_salt".to_string(),
                        "auth.private_key_pem".to_string(),
                    ]
                );
            }
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }
}
