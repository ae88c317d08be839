//! HTTP client abstraction for making requests to the storefront backend

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

use crate::auth::{auth_headers, TokenStorage};
use crate::config::ClientOptions;
use crate::error::Error;

/// Pick the human-readable message for a failed response.
///
/// A non-empty string `error` field wins, then a non-empty string `detail`
/// field, then `"Failed to <operation> (<status>)"`.
pub fn error_message(body: Option<&Value>, operation: &str, status: u16) -> String {
    let field = |name: &str| {
        body.and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("error")
        .or_else(|| field("detail"))
        .unwrap_or_else(|| format!("Failed to {} ({})", operation, status))
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    operation: String,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let operation = format!("{} {}", method, url);
        Self {
            client,
            url: url.to_string(),
            method,
            headers: HeaderMap::new(),
            query_params: Vec::new(),
            body: None,
            operation,
        }
    }

    /// Name the operation for the fallback error message, e.g. `"fetch cart"`
    pub fn operation(mut self, name: &str) -> Self {
        self.operation = name.to_string();
        self
    }

    /// Add a header to the request. Invalid names or values are skipped.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!("Skipping invalid header {:?}", name),
        }
        self
    }

    /// Merge a prepared header map into the request
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Append one query parameter. Order of calls is preserved.
    pub fn query_param(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    /// Add a form-encoded body to the request
    pub fn form(mut self, pairs: &[(&str, &str)]) -> Self {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.body = Some(encoded.into_bytes());
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        self
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and parse the response as JSON.
    ///
    /// Non-success statuses become [`Error::Api`] with the message chosen by
    /// [`error_message`]. An empty success body parses as JSON `null`.
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let req = self.build()?;
        debug!(
            "{} {} (auth: {})",
            self.method,
            self.url,
            self.headers.contains_key(AUTHORIZATION)
        );
        let response = req.send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let blank = bytes.iter().all(u8::is_ascii_whitespace);

        if !status.is_success() {
            let details = if blank {
                None
            } else {
                serde_json::from_slice::<Value>(&bytes).ok()
            };
            let message = error_message(details.as_ref(), &self.operation, status.as_u16());
            warn!(
                "{} failed with status {}: {}",
                self.operation,
                status.as_u16(),
                message
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
                details,
            });
        }

        let result = if blank {
            serde_json::from_value(Value::Null)?
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(result)
    }
}

/// Shared state every sub-client issues requests with
#[derive(Clone)]
pub(crate) struct ApiContext {
    pub(crate) http_client: Client,
    pub(crate) options: Arc<ClientOptions>,
    pub(crate) tokens: TokenStorage,
    /// Explicit token; takes precedence over the stored one
    pub(crate) token: Option<String>,
}

impl ApiContext {
    /// Start a request with the Authorization header resolved
    pub(crate) fn request(
        &self,
        method: Method,
        url: &str,
        operation: &str,
    ) -> Result<FetchBuilder<'_>, Error> {
        let headers = auth_headers(self.token.as_deref(), self.tokens.persistent())?;
        Ok(FetchBuilder::new(&self.http_client, url, method)
            .operation(operation)
            .headers(headers))
    }

    pub(crate) fn get(&self, url: &str, operation: &str) -> Result<FetchBuilder<'_>, Error> {
        self.request(Method::GET, url, operation)
    }

    /// POST with `Content-Type: application/json` even when there is no body
    pub(crate) fn post(&self, url: &str, operation: &str) -> Result<FetchBuilder<'_>, Error> {
        Ok(self
            .request(Method::POST, url, operation)?
            .header("Content-Type", "application/json"))
    }

    pub(crate) fn put(&self, url: &str, operation: &str) -> Result<FetchBuilder<'_>, Error> {
        Ok(self
            .request(Method::PUT, url, operation)?
            .header("Content-Type", "application/json"))
    }
}
