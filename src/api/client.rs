//! HTTP client for the Cloudflare API

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, trace};

use crate::api::response::ApiResponse;
use crate::api::AccessApi;
use crate::auth::Credentials;
use crate::error::{Error, Result};

pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare API client scoped to one account.
pub struct AccessClient {
    client: Client,
    credentials: Credentials,
}

impl AccessClient {
    /// Create a new client from resolved credentials.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fastpass/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, credentials })
    }

    /// Account-scoped paths get the `/accounts/{id}` prefix; `/zones` and
    /// `/accounts` paths are already absolute within the API.
    fn full_url(&self, path: &str) -> String {
        if path.starts_with("/zones") || path.starts_with("/accounts") {
            format!("{}{}", CF_API_BASE, path)
        } else {
            format!(
                "{}/accounts/{}{}",
                CF_API_BASE, self.credentials.account_id, path
            )
        }
    }

    fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.credentials.token)
            .header("Content-Type", "application/json")
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse<Value>> {
        let url = self.full_url(path);
        debug!("{} {}", method, url);

        let mut req = self.build_request(method, &url);
        if let Some(body) = body {
            trace!("Request body: {}", body);
            req = req.json(&body);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!("Response: {}", text);

        let envelope: ApiResponse<Value> = serde_json::from_str(&text).map_err(|_| Error::Api {
            status,
            messages: format!("Unexpected response ({}): {}", status, text),
        })?;

        if !envelope.success {
            return Err(Error::Api {
                status,
                messages: envelope.error_messages(),
            });
        }

        Ok(envelope)
    }
}

#[async_trait]
impl AccessApi for AccessClient {
    async fn get(&self, path: &str) -> Result<ApiResponse<Value>> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse<Value>> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse<Value>> {
        self.request(Method::DELETE, path, None).await
    }
}
