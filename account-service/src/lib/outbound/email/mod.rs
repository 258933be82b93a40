pub mod smtp;

pub use smtp::LettreEmailSender;
