pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::account;
pub use domain::confirmation;
pub use domain::token;
pub use outbound::repositories;
