//! Envelope decoding: envelope string + secret → value.

use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher;
use crate::envelope::Envelope;
use crate::error::EnvelopeError;
use crate::kdf::{derive_key, KdfParams};

/// Opens envelopes produced by an [`Encoder`](crate::Encoder).
///
/// The KDF parameters must match the ones the envelope was sealed with; they
/// are not recorded in the envelope itself.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    kdf: KdfParams,
}

impl Decoder {
    pub fn new(kdf: KdfParams) -> Self {
        Self { kdf }
    }

    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    /// Parse, authenticate, decrypt and deserialize `envelope`.
    ///
    /// # Errors
    ///
    /// - [`EnvelopeError::Format`] if the string is structurally invalid. No
    ///   key derivation happens in that case.
    /// - [`EnvelopeError::Authentication`] on a wrong secret or any tampering.
    /// - [`EnvelopeError::Encoding`] if the plaintext is not JSON of type `T`.
    /// - [`EnvelopeError::Primitive`] if the KDF or cipher fails.
    pub fn decode<T>(&self, envelope: &str, secret: &str) -> Result<T, EnvelopeError>
    where
        T: DeserializeOwned,
    {
        let parsed: Envelope = envelope.parse()?;
        let plaintext = self.open(&parsed, secret)?;
        let text = std::str::from_utf8(&plaintext)
            .map_err(|e| EnvelopeError::Encoding(format!("plaintext is not utf-8: {e}")))?;
        Ok(serde_json::from_str(text)?)
    }

    /// Authenticate and decrypt a parsed envelope to its raw plaintext.
    pub fn open(&self, envelope: &Envelope, secret: &str) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
        let key = derive_key(secret, &envelope.salt, &self.kdf)?;
        match cipher::open(&key, &envelope.iv, &envelope.ciphertext, &envelope.tag) {
            Ok(plaintext) => Ok(Zeroizing::new(plaintext)),
            Err(e) => {
                debug!(error.kind = e.kind().as_str(), "envelope rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::error::{ErrorKind, Field, FormatError};
    use serde_json::{json, Value};

    fn fast() -> KdfParams {
        KdfParams::with_iterations(1_000)
    }

    fn pair() -> (Encoder, Decoder) {
        (Encoder::default().with_kdf(fast()), Decoder::new(fast()))
    }

    #[test]
    fn round_trip_object() {
        let (enc, dec) = pair();
        let env = enc.encode(&json!({"a": 1}), "k1").unwrap();
        let back: Value = dec.decode(&env, "k1").unwrap();
        assert_eq!(back, json!({"a": 1}));
    }

    #[test]
    fn round_trip_typed() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Smtp {
            user: String,
            pass: String,
        }
        let (enc, dec) = pair();
        let creds = Smtp {
            user: "ada@example.com".into(),
            pass: "p@ss:word".into(),
        };
        let env = enc.encode(&creds, "k1").unwrap();
        assert_eq!(dec.decode::<Smtp>(&env, "k1").unwrap(), creds);
    }

    #[test]
    fn wrong_secret_is_authentication_error() {
        let (enc, dec) = pair();
        let env = enc.encode("x", "k1").unwrap();
        let err = dec.decode::<Value>(&env, "k2").unwrap_err();
        assert!(matches!(err, EnvelopeError::Authentication));
    }

    #[test]
    fn changed_tag_char_is_authentication_error() {
        let (enc, dec) = pair();
        let mut env = enc.encode("hello", "k1").unwrap();
        let last = env.pop().unwrap();
        env.push(if last == '0' { '1' } else { '0' });
        assert!(matches!(
            dec.decode::<Value>(&env, "k1"),
            Err(EnvelopeError::Authentication)
        ));
    }

    #[test]
    fn changed_salt_is_authentication_error() {
        let (enc, dec) = pair();
        let env = enc.encode("hello", "k1").unwrap();
        let mut parsed: Envelope = env.parse().unwrap();
        parsed.salt.push(b'0');
        assert!(matches!(
            dec.decode::<Value>(&parsed.to_string(), "k1"),
            Err(EnvelopeError::Authentication)
        ));
    }

    #[test]
    fn floats_round_trip_bit_exact() {
        let (enc, dec) = pair();
        for f in [1.0715660391465826e-75_f64, 0.1, -2.5e-308, 1.7976931348623157e308, 5e-324] {
            let env = enc.encode(&f, "k1").unwrap();
            let back: f64 = dec.decode(&env, "k1").unwrap();
            assert_eq!(back.to_bits(), f.to_bits(), "{f:e}");
        }
    }

    #[test]
    fn empty_salt_is_opened_not_rejected() {
        let key = derive_key("k1", b"", &fast()).unwrap();
        let sealed = cipher::seal(&key, &[1u8; 12], b"\"x\"").unwrap();
        let env = Envelope {
            salt: Vec::new(),
            iv: [1u8; 12],
            ciphertext: sealed.ciphertext,
            tag: sealed.tag,
        }
        .to_string();
        assert!(env.starts_with(':'));
        assert_eq!(pair().1.decode::<String>(&env, "k1").unwrap(), "x");
    }

    #[test]
    fn stripped_salt_is_authentication_error() {
        let (enc, dec) = pair();
        let env = enc.encode("hello", "k1").unwrap();
        let rest = env.split_once(':').unwrap().1;
        assert!(matches!(
            dec.decode::<Value>(&format!(":{rest}"), "k1"),
            Err(EnvelopeError::Authentication)
        ));
    }

    #[test]
    fn two_fields_is_format_error() {
        let err = Decoder::default().decode::<Value>("ab:cd", "k1").unwrap_err();
        assert!(matches!(err, EnvelopeError::Format(FormatError::FieldCount(2))));
    }

    #[test]
    fn non_hex_salt_is_format_error() {
        let (enc, dec) = pair();
        let env = enc.encode("x", "k1").unwrap();
        let rest = env.split_once(':').unwrap().1;
        let err = dec.decode::<Value>(&format!("zz:{rest}"), "k1").unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::Format(FormatError::InvalidHex { field: Field::Salt })
        ));
    }

    #[test]
    fn non_json_plaintext_is_encoding_error() {
        let (enc, dec) = pair();
        let env = enc.seal(b"not json", "k1").unwrap().to_string();
        let err = dec.decode::<Value>(&env, "k1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn non_utf8_plaintext_is_encoding_error() {
        let (enc, dec) = pair();
        let env = enc.seal(&[0xff, 0xfe], "k1").unwrap().to_string();
        let err = dec.decode::<Value>(&env, "k1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn mismatched_kdf_params_fail_authentication() {
        let enc = Encoder::default().with_kdf(fast());
        let env = enc.encode("x", "k1").unwrap();
        let dec = Decoder::new(KdfParams::with_iterations(999));
        assert!(matches!(
            dec.decode::<Value>(&env, "k1"),
            Err(EnvelopeError::Authentication)
        ));
    }

    #[test]
    fn decodes_web_crypto_envelope() {
        let env = "343832393133:7f119403c0ce9175fff986b7:c798afc5468608:\
                   f6704ace16c16d7ed6fccbd5b2d8dd33";
        let back: Value = Decoder::default().decode(env, "k1").unwrap();
        assert_eq!(back, json!({"a": 1}));
    }
}
