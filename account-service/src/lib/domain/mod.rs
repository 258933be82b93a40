pub mod account;
pub mod confirmation;
pub mod errors;
pub mod ports;
pub mod token;
