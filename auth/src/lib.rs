//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id with a process-wide pepper)
//! - Signed access/refresh token issuance and verification (EdDSA)
//! - Reversible salted obfuscation of internal record identifiers
//!
//! Each service defines its own authentication traits and adapts these implementations.
//! This avoids coupling services through shared domain logic while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new("process-wide pepper material").unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Opaque Identifiers
//! ```
//! use auth::IdCodec;
//!
//! let codec = IdCodec::new("deployment-salt", Some("ie")).unwrap();
//! let external = codec.encode(42);
//! assert_eq!(codec.decode(&external).unwrap(), 42);
//! ```
//!
//! ## Signed Tokens
//! ```no_run
//! use auth::{AccessTokenClaims, TokenSigner};
//! use chrono::Duration;
//!
//! # let (public_pem, private_pem) = (vec![], vec![]);
//! let signer = TokenSigner::new(&public_pem, &private_pem).unwrap();
//! let claims = AccessTokenClaims::new("ie4PTdzMK3J9", "buyer", Duration::minutes(15));
//! let token = signer.encode(&claims).unwrap();
//! let decoded: AccessTokenClaims = signer.decode(&token).unwrap();
//! ```

pub mod idcodec;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use idcodec::IdCodec;
pub use idcodec::IdCodecError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessTokenClaims;
pub use token::RefreshTokenClaims;
pub use token::TokenError;
pub use token::TokenSigner;
