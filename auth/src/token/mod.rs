pub mod claims;
pub mod errors;
pub mod signer;

pub use claims::AccessTokenClaims;
pub use claims::RefreshTokenClaims;
pub use claims::TOKEN_TYPE_ACCESS;
pub use claims::TOKEN_TYPE_REFRESH;
pub use errors::TokenError;
pub use signer::TokenSigner;
