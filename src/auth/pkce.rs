//! PKCE (RFC 7636) verifier and challenge generation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::Rng;
use sha2::{Digest, Sha256};

const UNRESERVED: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Length of generated verifiers (RFC 7636 allows 43..=128)
pub const VERIFIER_LENGTH: usize = 64;

/// A code verifier and the S256 challenge derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkce {
    /// Secret kept client-side until the code exchange
    pub verifier: String,
    /// `base64url(sha256(verifier))`, sent with the authorization request
    pub challenge: String,
}

impl Pkce {
    /// Generate a fresh random verifier and its challenge
    pub fn generate() -> Self {
        Self::from_verifier(random_string(VERIFIER_LENGTH, UNRESERVED))
    }

    /// Derive the challenge for an existing verifier
    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = challenge_for(&verifier);
        Self {
            verifier,
            challenge,
        }
    }

    /// The only challenge method this client uses
    pub fn method(&self) -> &'static str {
        "S256"
    }
}

/// S256 challenge for `verifier`
pub fn challenge_for(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Random alphanumeric string, used for the OAuth `state` parameter
pub fn random_state() -> String {
    random_string(32, &UNRESERVED[..62])
}

fn random_string(length: usize, charset: &[u8]) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(charset[rng.gen_range(0..charset.len())]))
        .collect()
}
