//! Authentication: token storage, the Authorization header and the OAuth
//! PKCE login flow against the backend's provider.

mod pkce;
mod storage;
mod types;

use log::info;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

use crate::error::Error;
use crate::fetch::{ApiContext, FetchBuilder};

pub use pkce::*;
pub use storage::*;
pub use types::*;

/// Persistent-store key holding the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Session-store key holding the in-flight PKCE code verifier
pub const PKCE_VERIFIER_KEY: &str = "pkce_code_verifier";

/// Choose the bearer token for a request.
///
/// A non-empty explicit token wins; otherwise the stored access token is
/// used if present and non-empty.
pub fn resolve_token(
    explicit: Option<&str>,
    store: &dyn KeyValueStore,
) -> Result<Option<String>, Error> {
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        return Ok(Some(token.to_string()));
    }
    Ok(store.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty()))
}

/// Headers carrying `Authorization: Bearer <token>` when a token is
/// available, empty otherwise.
pub fn auth_headers(explicit: Option<&str>, store: &dyn KeyValueStore) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    if let Some(token) = resolve_token(explicit, store)? {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::auth("access token contains characters not allowed in a header"))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// The client's persisted state: a persistent store for the access token and
/// a session-scoped store for the PKCE verifier.
#[derive(Clone)]
pub struct TokenStorage {
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl TokenStorage {
    /// Pair two stores
    pub fn new(persistent: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            persistent,
            session,
        }
    }

    /// Both scopes held in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Persistent scope
    pub fn persistent(&self) -> &dyn KeyValueStore {
        self.persistent.as_ref()
    }

    /// Session scope
    pub fn session(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }

    /// Stored access token
    pub fn access_token(&self) -> Result<Option<String>, Error> {
        self.persistent.get(ACCESS_TOKEN_KEY)
    }

    /// Store the access token
    pub fn set_access_token(&self, token: &str) -> Result<(), Error> {
        self.persistent.set(ACCESS_TOKEN_KEY, token)
    }

    /// Stored PKCE verifier
    pub fn pkce_verifier(&self) -> Result<Option<String>, Error> {
        self.session.get(PKCE_VERIFIER_KEY)
    }

    /// Store the PKCE verifier
    pub fn set_pkce_verifier(&self, verifier: &str) -> Result<(), Error> {
        self.session.set(PKCE_VERIFIER_KEY, verifier)
    }

    /// Remove the access token and the PKCE verifier
    pub fn clear(&self) -> Result<(), Error> {
        self.persistent.remove(ACCESS_TOKEN_KEY)?;
        self.session.remove(PKCE_VERIFIER_KEY)?;
        info!("Cleared stored access token and PKCE verifier");
        Ok(())
    }
}

impl Default for TokenStorage {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Client for the backend's OAuth 2.0 provider (authorization code + PKCE)
pub struct OAuthClient {
    ctx: ApiContext,
}

impl OAuthClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    fn client_id(&self) -> Result<&str, Error> {
        self.ctx
            .options
            .oauth_client_id
            .as_deref()
            .ok_or_else(|| Error::config("OAuth client id is not configured"))
    }

    /// Start a login: store a fresh PKCE verifier in the session store and
    /// return the authorization URL to send the user to.
    pub fn begin_authorization(&self, redirect_uri: &str) -> Result<AuthorizationRequest, Error> {
        let client_id = self.client_id()?;
        let pkce = Pkce::generate();
        let state = random_state();

        let mut url = Url::parse(&self.ctx.options.oauth_url("/authorize/"))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &self.ctx.options.oauth_scopes)
            .append_pair("code_challenge", &pkce.challenge)
            .append_pair("code_challenge_method", pkce.method())
            .append_pair("state", &state);

        self.ctx.tokens.set_pkce_verifier(&pkce.verifier)?;

        Ok(AuthorizationRequest {
            url: url.to_string(),
            state,
        })
    }

    /// Finish a login: trade the authorization code for an access token,
    /// store the token and drop the verifier.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, Error> {
        let client_id = self.client_id()?;
        let verifier = self
            .ctx
            .tokens
            .pkce_verifier()?
            .ok_or_else(|| Error::auth("no PKCE code verifier stored; start the login again"))?;

        let url = self.ctx.options.oauth_url("/token/");
        let token = FetchBuilder::new(&self.ctx.http_client, &url, Method::POST)
            .operation("exchange authorization code")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", client_id),
                ("code_verifier", verifier.as_str()),
            ])
            .execute::<TokenResponse>()
            .await?;

        self.ctx.tokens.set_access_token(&token.access_token)?;
        self.ctx.tokens.session().remove(PKCE_VERIFIER_KEY)?;
        info!("Stored access token from authorization code exchange");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_token_takes_precedence() {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "stored").unwrap();

        let headers = auth_headers(Some("explicit"), &store).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer explicit");
    }

    #[test]
    fn stored_token_used_when_no_explicit_token() {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "stored").unwrap();

        assert_eq!(
            auth_headers(None, &store).unwrap().get(AUTHORIZATION).unwrap(),
            "Bearer stored"
        );
        assert_eq!(
            auth_headers(Some(""), &store).unwrap().get(AUTHORIZATION).unwrap(),
            "Bearer stored"
        );
    }

    #[test]
    fn no_token_means_no_header() {
        let store = MemoryStore::new();
        assert!(auth_headers(None, &store).unwrap().is_empty());

        store.set(ACCESS_TOKEN_KEY, "").unwrap();
        assert!(auth_headers(None, &store).unwrap().is_empty());
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(
            auth_headers(Some("bad\ntoken"), &store),
            Err(Error::Auth(_))
        ));
    }

    #[test]
    fn clear_removes_both_scopes() {
        let tokens = TokenStorage::in_memory();
        tokens.set_access_token("abc").unwrap();
        tokens.set_pkce_verifier("verifier").unwrap();

        tokens.clear().unwrap();

        assert_eq!(tokens.access_token().unwrap(), None);
        assert_eq!(tokens.pkce_verifier().unwrap(), None);
        assert!(auth_headers(None, tokens.persistent()).unwrap().is_empty());
    }
}
