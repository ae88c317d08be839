//! Storefront Rust Client Library
//!
//! A client for the storefront REST backend: catalog, cart, orders and
//! account endpoints, with bearer-token authorization read from an injected
//! token store and an OAuth 2.0 PKCE login helper.

pub mod accounts;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod list;
pub mod orders;

use reqwest::Client;
use std::sync::Arc;

use crate::accounts::AccountsClient;
use crate::auth::{OAuthClient, TokenStorage};
use crate::cart::CartClient;
use crate::catalog::CatalogClient;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::ApiContext;
use crate::orders::OrdersClient;

/// The main entry point for the storefront client
#[derive(Clone)]
pub struct Storefront {
    ctx: ApiContext,
}

impl Storefront {
    /// Create a client for the backend at `base_url`, keeping tokens in memory
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_client::Storefront;
    ///
    /// let shop = Storefront::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(
            ClientOptions::default().with_base_url(base_url),
            TokenStorage::in_memory(),
            Client::new(),
        )
    }

    /// Create a client configured from the environment
    /// (see [`ClientOptions::from_env`])
    pub fn from_env(tokens: TokenStorage) -> Result<Self, Error> {
        Self::new_with_options(ClientOptions::from_env()?, tokens)
    }

    /// Create a client with custom options and token storage
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use storefront_client::{Storefront, auth::TokenStorage, config::ClientOptions};
    ///
    /// let options = ClientOptions::default()
    ///     .with_base_url("https://shop.example.com")
    ///     .with_request_timeout(Some(Duration::from_secs(10)));
    /// let shop = Storefront::new_with_options(options, TokenStorage::in_memory()).unwrap();
    /// ```
    pub fn new_with_options(options: ClientOptions, tokens: TokenStorage) -> Result<Self, Error> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        Ok(Self::with_http_client(options, tokens, http_client))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(
        options: ClientOptions,
        tokens: TokenStorage,
        http_client: Client,
    ) -> Self {
        Self {
            ctx: ApiContext {
                http_client,
                options: Arc::new(options),
                tokens,
                token: None,
            },
        }
    }

    /// A copy of this client that sends `token` instead of the stored one
    pub fn with_auth(&self, token: &str) -> Self {
        let mut ctx = self.ctx.clone();
        ctx.token = Some(token.to_string());
        Self { ctx }
    }

    /// The client options
    pub fn options(&self) -> &ClientOptions {
        &self.ctx.options
    }

    /// The token storage shared by all sub-clients
    pub fn tokens(&self) -> &TokenStorage {
        &self.ctx.tokens
    }

    /// Product and category operations
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(self.ctx.clone())
    }

    /// Cart operations
    pub fn cart(&self) -> CartClient {
        CartClient::new(self.ctx.clone())
    }

    /// Order operations
    pub fn orders(&self) -> OrdersClient {
        OrdersClient::new(self.ctx.clone())
    }

    /// Profile and registration operations
    pub fn accounts(&self) -> AccountsClient {
        AccountsClient::new(self.ctx.clone())
    }

    /// OAuth login flow
    pub fn oauth(&self) -> OAuthClient {
        OAuthClient::new(self.ctx.clone())
    }

    /// Forget the stored access token and any in-flight PKCE verifier.
    /// No request is made. An explicit token set with
    /// [`with_auth`](Self::with_auth) is unaffected.
    pub fn logout(&self) -> Result<(), Error> {
        self.ctx.tokens.clear()
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{FileStore, KeyValueStore, MemoryStore, TokenStorage};
    pub use crate::catalog::ProductQuery;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::orders::{OrderFilter, OrderStatus};
    pub use crate::Storefront;
}
