// Token acquisition and refresh against the vendor token endpoint

use crate::store::TokenStore;
use crate::token::OAuthToken;
use crate::Result;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

/// Body of a successful refresh response from the vendor
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: i64,
    refresh_token: String,
    refresh_token_expires_in: i64,
    token_type: String,
    useremail: String,
}

/// Hands out OAuth tokens that are valid for an upstream call, refreshing
/// and persisting them when the stored one has expired.
pub struct TokenBroker {
    store: TokenStore,
    token_url: String,
    client: reqwest::Client,
}

impl TokenBroker {
    /// Create a broker for the vendor host's standard token endpoint
    pub fn new(store: TokenStore, host: impl Into<String>) -> Self {
        Self {
            store,
            token_url: format!("https://{}/rest/auth/token", host.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Override the full token endpoint URL (non-standard deployments, tests)
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Fetch a token that is valid right now.
    ///
    /// A valid stored token is returned as-is; an expired one triggers a
    /// refresh. When the vendor rejects the refresh, the stored token is
    /// returned unchanged so the page still gets a best-effort header set.
    pub async fn get_token(&self) -> Result<OAuthToken> {
        let token = self.store.load()?;
        if token.is_access_valid(Utc::now()) {
            return Ok(token);
        }

        debug!(user = %token.user, "access token expired, refreshing");
        self.refresh(token).await
    }

    async fn refresh(&self, current: OAuthToken) -> Result<OAuthToken> {
        let response = self
            .client
            .post(&self.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("refresh_token={}", current.refresh_token))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "token refresh rejected, keeping stored token");
            return Ok(current);
        }

        let body: RefreshResponse = response.json().await?;
        let token = OAuthToken {
            access_token: body.access_token,
            access_expiry: body.expires_in,
            refresh_token: body.refresh_token,
            refresh_expiry: body.refresh_token_expires_in,
            token_type: body.token_type,
            user: body.useremail,
            issued_at: Utc::now(),
        };

        self.store.replace(&token)?;
        Ok(token)
    }
}
