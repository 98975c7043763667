use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawCustomer;

// Ingest-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, request: &HttpGetRequest) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug, Default)]
pub struct HttpGetRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Diagnostic store for a raw fetch, so runs can be replayed offline
#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    async fn save(&self, customers: &[RawCustomer]) -> Result<()>;
    async fn load(&self) -> Result<Vec<RawCustomer>>;
}
