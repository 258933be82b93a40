pub mod codec;
pub mod errors;

pub use codec::IdCodec;
pub use errors::IdCodecError;
