//! Session token formatting, parsing and digests.
//!
//! Tokens look like `fw_v1_<uuid>.<64 hex chars>`. The uuid names the session; the secret is
//! never stored, only a SHA-256 digest of the whole token.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "fw";

/// Number of secret bytes encoded in a token.
pub const SESSION_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub session_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionSecret {
    let mut secret = [0_u8; SESSION_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionSecret::from_bytes(secret)
}

#[must_use]
pub fn format_session_token(
    session_uuid: Uuid,
    version: SessionTokenVersion,
    secret: &SessionSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Split a raw bearer token into its parts.
///
/// # Errors
///
/// Returns a [`SessionTokenError`] when the token isn't in the expected shape.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret_hex) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let session_uuid =
        Uuid::try_parse(uuid_segment).map_err(|_err| SessionTokenError::InvalidFormat)?;

    let secret = decode_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        session_uuid,
        version,
        secret: SessionSecret::from_bytes(secret),
    })
}

/// SHA-256 digest of a raw token, as kept server side.
#[must_use]
pub fn token_digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// Hex SHA-256 digest of a password.
#[must_use]
pub fn password_digest(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn decode_hex(hex: &str) -> Option<[u8; SESSION_SECRET_BYTES]> {
    if hex.len() != SESSION_SECRET_BYTES * 2 {
        return None;
    }

    let mut secret = [0_u8; SESSION_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_nibble(*hi)? << 4) | decode_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formatted_token_parses_back() -> TestResult {
        let session_uuid = Uuid::nil();
        let secret = SessionSecret::from_bytes([0xAB; SESSION_SECRET_BYTES]);
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);
        let parsed = parse_session_token(&token)?;

        assert!(token.starts_with("fw_v1_"));
        assert_eq!(parsed.session_uuid, session_uuid);
        assert_eq!(parsed.version, SessionTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn parse_rejects_foreign_prefix() {
        assert_eq!(
            parse_session_token("lt_v1_00000000000000000000000000000000.aa").err(),
            Some(SessionTokenError::InvalidFormat)
        );
    }

    #[test]
    fn parse_rejects_unknown_version() {
        assert_eq!(
            parse_session_token("fw_v9_00000000000000000000000000000000.aa").err(),
            Some(SessionTokenError::UnsupportedVersion)
        );
    }

    #[test]
    fn parse_rejects_short_or_non_hex_secret() {
        let uuid = Uuid::nil().simple();

        assert_eq!(
            parse_session_token(&format!("fw_v1_{uuid}.abcd")).err(),
            Some(SessionTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            parse_session_token(&format!("fw_v1_{uuid}.{}", "zz".repeat(32))).err(),
            Some(SessionTokenError::InvalidSecretEncoding)
        );
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SessionSecret::from_bytes([1; SESSION_SECRET_BYTES]);

        assert_eq!(format!("{secret:?}"), "SessionSecret(**redacted**)");
    }

    #[test]
    fn password_digest_is_hex_sha256() {
        assert_eq!(
            password_digest("admin123"),
            "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
        );
    }
}
