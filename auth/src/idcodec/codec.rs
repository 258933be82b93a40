use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::Digest;
use sha2::Sha256;

use super::errors::IdCodecError;

/// Minimum accepted salt length in characters.
const MIN_SALT_LEN: usize = 8;

/// Length of the encoded payload: 8 masked id bytes plus 1 check byte.
const PAYLOAD_LEN: usize = 9;

/// Reversible, salted obfuscation of internal `i64` record identifiers.
///
/// Encoding is deterministic for a fixed salt: the id bytes are masked with
/// a salt-derived keystream, a salt-bound check byte is appended, and the
/// result is base64url-encoded behind a per-entity-kind prefix. The prefix
/// keeps identifiers of different kinds from being interchangeable.
///
/// This is enumeration protection, not access control: anyone holding the
/// salt can reverse it. Authorization never depends on these being secret.
pub struct IdCodec {
    prefix: String,
    salt: Vec<u8>,
    keystream: [u8; 8],
}

impl IdCodec {
    /// Create a codec for one entity kind.
    ///
    /// # Arguments
    /// * `salt` - Per-deployment salt (same salt must be used to decode)
    /// * `prefix` - Optional kind prefix prepended to every identifier
    ///
    /// # Errors
    /// * `WeakSalt` - Salt is shorter than the accepted minimum
    pub fn new(salt: &str, prefix: Option<&str>) -> Result<Self, IdCodecError> {
        if salt.len() < MIN_SALT_LEN {
            return Err(IdCodecError::WeakSalt {
                min: MIN_SALT_LEN,
                actual: salt.len(),
            });
        }

        let digest = Sha256::digest(salt.as_bytes());
        let mut keystream = [0u8; 8];
        keystream.copy_from_slice(&digest[..8]);

        Ok(Self {
            prefix: prefix.unwrap_or_default().to_string(),
            salt: salt.as_bytes().to_vec(),
            keystream,
        })
    }

    fn check_byte(&self, masked: &[u8]) -> u8 {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update(masked);
        hasher.finalize()[0]
    }

    /// Encode an internal id into its opaque external form.
    pub fn encode(&self, id: i64) -> String {
        let mut payload = [0u8; PAYLOAD_LEN];
        for (i, byte) in id.to_be_bytes().iter().enumerate() {
            payload[i] = byte ^ self.keystream[i];
        }
        payload[PAYLOAD_LEN - 1] = self.check_byte(&payload[..PAYLOAD_LEN - 1]);

        format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(payload))
    }

    /// Decode an opaque external identifier back to the internal id.
    ///
    /// Input is untrusted; every structural defect is reported as a
    /// `MalformedIdentifier` error and nothing ever panics.
    ///
    /// # Errors
    /// * `MalformedIdentifier` - Wrong prefix, bad encoding, wrong length,
    ///   or check byte mismatch
    pub fn decode(&self, external: &str) -> Result<i64, IdCodecError> {
        let encoded = external.strip_prefix(&self.prefix).ok_or_else(|| {
            IdCodecError::MalformedIdentifier("missing entity prefix".to_string())
        })?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| IdCodecError::MalformedIdentifier(e.to_string()))?;

        if payload.len() != PAYLOAD_LEN {
            return Err(IdCodecError::MalformedIdentifier(format!(
                "unexpected payload length {}",
                payload.len()
            )));
        }

        let masked = &payload[..PAYLOAD_LEN - 1];
        if payload[PAYLOAD_LEN - 1] != self.check_byte(masked) {
            return Err(IdCodecError::MalformedIdentifier(
                "check byte mismatch".to_string(),
            ));
        }

        let mut bytes = [0u8; 8];
        for (i, byte) in masked.iter().enumerate() {
            bytes[i] = byte ^ self.keystream[i];
        }

        Ok(i64::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> IdCodec {
        IdCodec::new("unit-test-salt", Some("ie")).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();

        for id in [0, 1, 42, 1_000_000, i64::MAX, i64::MIN, -7] {
            let external = codec.encode(id);
            assert!(external.starts_with("ie"));
            assert_eq!(codec.decode(&external).unwrap(), id);
        }
    }

    #[test]
    fn test_deterministic() {
        let codec = codec();
        assert_eq!(codec.encode(42), codec.encode(42));
    }

    #[test]
    fn test_weak_salt_rejected() {
        let result = IdCodec::new("short", None);
        assert!(matches!(result, Err(IdCodecError::WeakSalt { .. })));
    }

    #[test]
    fn test_prefixes_not_interchangeable() {
        let accounts = IdCodec::new("unit-test-salt", Some("ie")).unwrap();
        let tokens = IdCodec::new("unit-test-salt", Some("rt")).unwrap();

        let external = accounts.encode(42);
        assert!(tokens.decode(&external).is_err());
    }

    #[test]
    fn test_salts_not_interchangeable() {
        let one = IdCodec::new("unit-test-salt", Some("ie")).unwrap();
        let two = IdCodec::new("another-salt", Some("ie")).unwrap();

        let external = one.encode(42);
        assert!(two.decode(&external).is_err());
    }

    #[test]
    fn test_adversarial_input_never_panics() {
        let codec = codec();

        for input in [
            "",
            "ie",
            "zz4PTdzMK3J9",
            "ie!!!not-base64!!!",
            "ieAAAA",
            "ie\u{202e}\u{0000}",
            &"ieA".repeat(500),
        ] {
            assert!(codec.decode(input).is_err());
        }
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec();
        let external = codec.encode(42);

        let mut tampered = external.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(codec.decode(&tampered).is_err());
    }
}
