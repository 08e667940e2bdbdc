//! End-to-end scenarios against the public API with production KDF settings.

use envelope::{decode, encode, EnvelopeError, Field, FormatError};
use serde_json::{json, Value};

fn fields(env: &str) -> Vec<String> {
    env.split(':').map(str::to_owned).collect()
}

#[test]
fn object_round_trip() {
    let env = encode(&json!({"a": 1}), "k1").unwrap();
    let back: Value = decode(&env, "k1").unwrap();
    assert_eq!(back, json!({"a": 1}));
}

#[test]
fn same_input_twice_gives_distinct_envelopes() {
    let a = encode("hello", "k1").unwrap();
    let b = encode("hello", "k1").unwrap();
    assert_ne!(a, b);
    let (fa, fb) = (fields(&a), fields(&b));
    assert_ne!(fa[1], fb[1], "IVs must differ");
}

#[test]
fn wrong_secret_rejected() {
    let env = encode("x", "k1").unwrap();
    let err = decode::<Value>(&env, "k2").unwrap_err();
    assert!(matches!(err, EnvelopeError::Authentication));
    assert_eq!(err.to_string(), "authentication failed");
}

#[test]
fn modified_tag_rejected() {
    let env = encode("x", "k1").unwrap();
    let mut f = fields(&env);
    let tag = &mut f[3];
    let last = tag.pop().unwrap();
    tag.push(if last == 'f' { 'e' } else { 'f' });
    let err = decode::<Value>(&f.join(":"), "k1").unwrap_err();
    assert!(matches!(err, EnvelopeError::Authentication));
}

#[test]
fn two_field_envelope_is_format_error() {
    let err = decode::<Value>("ab:cd", "k1").unwrap_err();
    assert!(matches!(err, EnvelopeError::Format(FormatError::FieldCount(2))));
}

#[test]
fn non_hex_salt_is_format_error() {
    let env = encode("x", "k1").unwrap();
    let f = fields(&env);
    let bad = format!("zz:{}:{}:{}", f[1], f[2], f[3]);
    let err = decode::<Value>(&bad, "k1").unwrap_err();
    assert!(matches!(
        err,
        EnvelopeError::Format(FormatError::InvalidHex { field: Field::Salt })
    ));
}

#[test]
fn stored_mail_password_round_trip() {
    let env = encode("s3cr3t:smtp pass", "server-key").unwrap();
    assert_eq!(env.matches(':').count(), 3);
    let pass: String = decode(&env, "server-key").unwrap();
    assert_eq!(pass, "s3cr3t:smtp pass");
}

#[test]
fn web_crypto_envelope_decodes() {
    let env = "313137393031303633:070707070707070707070707:\
               4240f311578496c46f0ee54d1fcbf694400994:\
               20b82a63d24a5d103dd66d0bd91d5136";
    let pass: String = decode(env, "k1").unwrap();
    assert_eq!(pass, "hunter2-mail-pass");
}
