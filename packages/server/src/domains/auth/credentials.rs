//! Shared admin password and HTTP Basic credential parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Username recorded as the reviewer when an admin authenticates with only
/// the shared password.
pub const ADMIN_SUBJECT: &str = "admin";

/// The admin password, held only as a SHA-256 digest.
///
/// Candidates are hashed before comparison so the check does not depend on
/// the length of the configured secret.
pub struct AdminCredentials {
    digest: [u8; 32],
}

impl AdminCredentials {
    pub fn new(password: &str) -> Self {
        Self {
            digest: sha256(password),
        }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = sha256(candidate);
        // Fold every byte so timing does not reveal the first mismatch
        self.digest
            .iter()
            .zip(candidate.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

fn sha256(input: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher.finalize().into()
}

/// Decoded `Authorization: Basic` credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Parse an `Authorization` header value of the form `Basic <base64>`.
///
/// The password is everything after the first colon, so passwords may
/// themselves contain colons.
pub fn parse_basic_auth(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
