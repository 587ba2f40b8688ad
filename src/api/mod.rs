//! API client module

pub mod client;
pub mod response;
pub mod types;

pub use client::AccessClient;
pub use response::ApiResponse;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Narrow capability boundary over the Cloudflare API.
///
/// Commands and identity-provider setup only ever need these three verbs;
/// keeping the surface this small lets tests substitute an in-memory fake.
#[async_trait]
pub trait AccessApi: Send + Sync {
    async fn get(&self, path: &str) -> Result<ApiResponse<Value>>;
    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse<Value>>;
    async fn delete(&self, path: &str) -> Result<ApiResponse<Value>>;
}
