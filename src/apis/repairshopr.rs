use crate::app::ports::{HttpClientPort, HttpGetRequest};
use crate::config::RepairShoprConfig;
use crate::constants::{CUSTOMERS_PATH, CUSTOMERS_SORT};
use crate::error::{ExportError, Result};
use crate::types::{CustomersPage, RawCustomer, RecordSource};
use metrics::counter;
use tracing::{debug, info, instrument};

/// Paginated reader for the RepairShopr customers endpoint
pub struct RepairShoprApi {
    http: Box<dyn HttpClientPort>,
    base_url: String,
    token: String,
}

impl RepairShoprApi {
    pub fn new(http: Box<dyn HttpClientPort>, config: &RepairShoprConfig) -> Self {
        Self {
            http,
            base_url: config.base_url(),
            token: config.token.clone(),
        }
    }

    fn page_request(&self, page: u32) -> HttpGetRequest {
        HttpGetRequest {
            url: format!("{}{}", self.base_url, CUSTOMERS_PATH),
            query: vec![
                ("sort".to_string(), CUSTOMERS_SORT.to_string()),
                ("page".to_string(), page.to_string()),
            ],
            bearer_token: Some(self.token.clone()),
        }
    }

    /// Fetch and decode a single page
    async fn fetch_page(&self, page: u32) -> Result<CustomersPage> {
        let resp = self.http.get(&self.page_request(page)).await?;
        if !resp.is_success() {
            return Err(ExportError::from_status(
                resp.status,
                &String::from_utf8_lossy(&resp.bytes),
            ));
        }
        debug!("Page {} returned {} bytes of {}", page, resp.bytes.len(), resp.content_type);
        Ok(serde_json::from_slice(&resp.bytes)?)
    }
}

#[async_trait::async_trait]
impl RecordSource for RepairShoprApi {
    fn source_name(&self) -> &str {
        "repairshopr"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_all(&self) -> Result<Vec<RawCustomer>> {
        let mut page = 1;
        let mut total_pages = 1;
        let mut results = Vec::new();

        while page <= total_pages {
            let reply = self.fetch_page(page).await?;
            info!(
                "Received page {} of {} containing {} entries",
                reply.meta.page,
                reply.meta.total_pages,
                reply.customers.len()
            );
            counter!("rs_pages_fetched_total").increment(1);
            counter!("rs_customers_fetched_total").increment(reply.customers.len() as u64);

            results.extend(reply.customers);
            // Never request the same page twice, even if the server reports a stale index
            page = reply.meta.page.max(page).checked_add(1).ok_or_else(|| ExportError::Api {
                status: 200,
                message: format!("page index {} out of range", reply.meta.page),
            })?;
            total_pages = reply.meta.total_pages;
        }

        info!("Fetched {} customers", results.len());
        Ok(results)
    }
}
