//! Configuration options for the storefront client

use std::env;
use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Backend used when `BACKEND_BASE_URL` is not set
pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8000";

/// Every scope the backend's OAuth provider grants to the storefront
pub const DEFAULT_SCOPES: &str = "read:products write:products read:orders write:orders \
read:customers write:customers read:cart write:cart";

/// Configuration options for the storefront client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Backend origin, without trailing slash
    pub base_url: String,

    /// Path prefix of the REST API
    pub api_prefix: String,

    /// Path prefix of the account endpoints
    pub accounts_prefix: String,

    /// Path prefix of the OAuth provider
    pub oauth_prefix: String,

    /// Front-end origin, used to derive the default OAuth redirect URI
    pub frontend_base_url: Option<String>,

    /// OAuth client id registered with the backend
    pub oauth_client_id: Option<String>,

    /// Space separated OAuth scopes requested at authorization time
    pub oauth_scopes: String,

    /// The request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            api_prefix: "/api".to_string(),
            accounts_prefix: "/accounts".to_string(),
            oauth_prefix: "/o".to_string(),
            frontend_base_url: None,
            oauth_client_id: None,
            oauth_scopes: DEFAULT_SCOPES.to_string(),
            request_timeout: None,
            user_agent: format!("storefront-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Build options from `BACKEND_BASE_URL`, `FRONTEND_BASE_URL` and
    /// `OAUTH_CLIENT_ID`, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();
        let set = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        if let Some(base_url) = set("BACKEND_BASE_URL") {
            validate_base_url(base_url.trim()).map_err(|e| {
                Error::config(format!("invalid BACKEND_BASE_URL {:?}: {}", base_url, e))
            })?;
            options = options.with_base_url(base_url.trim());
        }

        if let Some(frontend) = set("FRONTEND_BASE_URL") {
            options = options.with_frontend_base_url(frontend.trim());
        }

        if let Some(client_id) = set("OAUTH_CLIENT_ID") {
            options = options.with_oauth_client_id(client_id.trim());
        }

        Ok(options)
    }

    /// Set the backend origin
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the REST API prefix
    pub fn with_api_prefix(mut self, value: &str) -> Self {
        self.api_prefix = normalize_prefix(value);
        self
    }

    /// Set the accounts prefix
    pub fn with_accounts_prefix(mut self, value: &str) -> Self {
        self.accounts_prefix = normalize_prefix(value);
        self
    }

    /// Set the OAuth provider prefix
    pub fn with_oauth_prefix(mut self, value: &str) -> Self {
        self.oauth_prefix = normalize_prefix(value);
        self
    }

    /// Set the front-end origin
    pub fn with_frontend_base_url(mut self, value: &str) -> Self {
        self.frontend_base_url = Some(value.trim_end_matches('/').to_string());
        self
    }

    /// Set the OAuth client id
    pub fn with_oauth_client_id(mut self, value: &str) -> Self {
        self.oauth_client_id = Some(value.to_string());
        self
    }

    /// Set the requested OAuth scopes
    pub fn with_oauth_scopes(mut self, value: &str) -> Self {
        self.oauth_scopes = value.to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, value: &str) -> Self {
        self.user_agent = value.to_string();
        self
    }

    /// Redirect URI the front end registers for the OAuth callback
    pub fn default_redirect_uri(&self) -> Option<String> {
        self.frontend_base_url
            .as_ref()
            .map(|origin| format!("{}/callback", origin))
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    pub(crate) fn accounts_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.accounts_prefix, path)
    }

    pub(crate) fn oauth_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.oauth_prefix, path)
    }
}

/// An origin requests can be built on: `http` or `https` with a host
fn validate_base_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}, expected http or https", url.scheme()));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err("URL has no host".to_string());
    }
    Ok(())
}

fn normalize_prefix(value: &str) -> String {
    let trimmed = value.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "http://localhost:8000");
        assert_eq!(options.api_url("/products/"), "http://localhost:8000/api/products/");
        assert_eq!(options.accounts_url("/user/"), "http://localhost:8000/accounts/user/");
        assert_eq!(options.oauth_url("/token/"), "http://localhost:8000/o/token/");
        assert!(options.request_timeout.is_none());
        assert!(options.default_redirect_uri().is_none());
    }

    #[test]
    fn builders_trim_slashes() {
        let options = ClientOptions::default()
            .with_base_url("https://shop.example.com/")
            .with_api_prefix("v2/api/")
            .with_frontend_base_url("https://app.example.com/");
        assert_eq!(options.api_url("/cart/"), "https://shop.example.com/v2/api/cart/");
        assert_eq!(
            options.default_redirect_uri().as_deref(),
            Some("https://app.example.com/callback")
        );
    }

    #[test]
    fn empty_prefix_is_allowed() {
        let options = ClientOptions::default().with_api_prefix("/");
        assert_eq!(options.api_url("/orders/"), "http://localhost:8000/orders/");
    }

    fn vars(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let pairs = pairs.to_vec();
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn from_vars_reads_settings() {
        let options = ClientOptions::from_vars(vars(&[
            ("BACKEND_BASE_URL", "https://shop.example.com/"),
            ("FRONTEND_BASE_URL", "https://app.example.com"),
            ("OAUTH_CLIENT_ID", " storefront-web "),
        ]))
        .unwrap();
        assert_eq!(options.base_url, "https://shop.example.com");
        assert_eq!(options.oauth_client_id.as_deref(), Some("storefront-web"));
        assert_eq!(
            options.default_redirect_uri().as_deref(),
            Some("https://app.example.com/callback")
        );
    }

    #[test]
    fn from_vars_blank_values_keep_defaults() {
        let options = ClientOptions::from_vars(vars(&[("BACKEND_BASE_URL", "  ")])).unwrap();
        assert_eq!(options.base_url, DEFAULT_BACKEND_BASE_URL);
    }

    #[test]
    fn from_vars_rejects_bad_base_urls() {
        for bad in ["localhost:8000", "not a url", "ftp://shop.example.com", "mailto:a@b.c"] {
            let result = ClientOptions::from_vars(vars(&[("BACKEND_BASE_URL", bad)]));
            assert!(
                matches!(result, Err(Error::Config(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn from_env_rejects_url_without_scheme() {
        env::set_var("BACKEND_BASE_URL", "localhost:8000");
        let result = ClientOptions::from_env();
        env::remove_var("BACKEND_BASE_URL");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
