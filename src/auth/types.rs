//! Types for the OAuth login flow

use serde::{Deserialize, Serialize};

/// Token endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The access token
    pub access_token: String,

    /// The token type, `Bearer` for this backend
    #[serde(default)]
    pub token_type: Option<String>,

    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// The refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Space separated scopes granted
    #[serde(default)]
    pub scope: Option<String>,
}

/// Where to send the user to authorize, plus the state to verify on return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Full `/o/authorize/` URL
    pub url: String,
    /// CSRF state echoed back on the callback
    pub state: String,
}
