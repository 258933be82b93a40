pub mod messages;
pub mod producer;

pub use messages::AccountEventMessage;
pub use producer::KafkaEventProducer;
