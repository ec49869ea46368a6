// Upstream header provider backed by the token broker

use crate::TokenBroker;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use veranda_core::{Error, HeaderProvider, UpstreamContext};

/// Produces the header mapping handlers use for vendor REST calls: a bearer
/// Authorization header and a JSON Accept header, plus the vendor base URL.
///
/// Token refresh and expiry live entirely behind the broker; handlers only
/// ever see a ready-to-use header set.
pub struct BearerHeaderProvider {
    broker: Arc<TokenBroker>,
    base_url: String,
}

impl BearerHeaderProvider {
    pub fn new(broker: Arc<TokenBroker>, base_url: impl Into<String>) -> Self {
        Self {
            broker,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl HeaderProvider for BearerHeaderProvider {
    async fn provide(&self) -> Result<UpstreamContext, Error> {
        let token = self
            .broker
            .get_token()
            .await
            .map_err(|e| Error::UpstreamAuth(e.to_string()))?;

        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", token.access_token),
        );
        headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(UpstreamContext {
            headers,
            base_url: self.base_url.clone(),
        })
    }
}
