//! API token formatting, parsing, and digest construction.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Token format version segment.
pub const API_TOKEN_VERSION: &str = "v1";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(token_uuid: Uuid, secret: &ApiTokenSecret) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{API_TOKEN_VERSION}_{}.{}",
        token_uuid.simple(),
        encode_secret_hex(secret.as_bytes())
    )
}

/// Validate a bearer token's shape and extract its token UUID.
///
/// The secret is never stored; authentication compares the digest of the full
/// token string against the stored hash, so parsing only guards the format.
pub fn parse_api_token(token: &str) -> Result<Uuid, ApiTokenError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let version = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    if version != API_TOKEN_VERSION {
        return Err(ApiTokenError::UnsupportedVersion);
    }

    let token_uuid =
        Uuid::try_parse(token_uuid_segment).map_err(|_| ApiTokenError::InvalidFormat)?;

    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS
        || !secret_hex.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(ApiTokenError::InvalidSecretEncoding);
    }

    Ok(token_uuid)
}

/// SHA-256 digest of the full token string, hex encoded, as stored at rest.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

fn encode_secret_hex(secret: &[u8; API_TOKEN_SECRET_BYTES]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(API_TOKEN_SECRET_HEX_CHARS);

    for byte in secret {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_and_parse_round_trip() {
        let token_uuid = Uuid::now_v7();
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(token_uuid, &secret);

        let parsed = parse_api_token(&token).expect("token should parse");

        assert_eq!(parsed, token_uuid);
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert!(parse_api_token("nope_v1_00000000000000000000000000000000.aa").is_err());
    }

    #[test]
    fn parse_rejects_unsupported_version() {
        let secret = ApiTokenSecret::from_bytes([0x01; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(Uuid::nil(), &secret).replacen("_v1_", "_v9_", 1);

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        let token = format!("sf_v1_{}.abcd", Uuid::nil().simple());

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn hash_token_is_deterministic() {
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(Uuid::nil(), &secret);

        assert_eq!(hash_token(&token), hash_token(&token));
        assert_eq!(hash_token(&token).len(), 64);
    }

    #[test]
    fn generated_secrets_differ() {
        let a = generate_api_token_secret();
        let b = generate_api_token_secret();

        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
