pub mod account;
pub mod confirmation;
pub mod token;

pub use account::PostgresAccountRepository;
pub use confirmation::PostgresConfirmationTokenRepository;
pub use token::PostgresRefreshTokenRepository;
