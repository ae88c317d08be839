//! Account endpoints under `/accounts/`, outside the REST API prefix

mod types;

use log::debug;

use crate::auth::resolve_token;
use crate::error::Error;
use crate::fetch::ApiContext;

pub use types::*;

/// Client for `/accounts/user/` and `/accounts/register/`
pub struct AccountsClient {
    ctx: ApiContext,
}

impl AccountsClient {
    pub(crate) fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// The signed-in user's profile.
    ///
    /// Returns `Ok(None)` without touching the network when no token is
    /// available, and `Ok(None)` when the backend answers 401. Every other
    /// failure, including 403 for a token lacking the `read:customers`
    /// scope, is an error.
    pub async fn fetch_current_user(&self) -> Result<Option<UserProfile>, Error> {
        if resolve_token(self.ctx.token.as_deref(), self.ctx.tokens.persistent())?.is_none() {
            debug!("No access token available; skipping user lookup");
            return Ok(None);
        }

        let url = self.ctx.options.accounts_url("/user/");
        match self
            .ctx
            .get(&url, "fetch user details")?
            .execute::<UserProfile>()
            .await
        {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.is_unauthorized() => {
                debug!("Backend rejected the access token: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the signed-in user's profile and return the stored result
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, Error> {
        let url = self.ctx.options.accounts_url("/user/");
        self.ctx
            .put(&url, "update user profile")?
            .json(profile)?
            .execute()
            .await
    }

    /// Create an account. Password validation failures come back as
    /// [`Error::Api`] with the field errors in `details`.
    pub async fn register(&self, registration: &Registration) -> Result<RegisterResponse, Error> {
        let url = self.ctx.options.accounts_url("/register/");
        self.ctx
            .post(&url, "register user")?
            .json(registration)?
            .execute()
            .await
    }
}
