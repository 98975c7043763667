use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A RepairShopr customer as returned by `/api/v1/customers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCustomer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub business_name: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub contacts: Option<Vec<RawContact>>,
}

/// A person attached to a (usually business) customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
}

/// Pagination block of a customers page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub total_pages: u32,
}

/// One page of the customers listing. Both keys are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomersPage {
    pub meta: PageMeta,
    pub customers: Vec<RawCustomer>,
}

/// One row of a FreePBX contact book import.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactEntry {
    pub groupname: String,
    pub grouptype: String,
    pub displayname: String,
    pub fname: String,
    pub lname: String,
    pub company: String,
    pub phone_1_number: String,
    pub phone_1_type: String,
    pub phone_2_number: String,
    pub phone_2_type: String,
    pub email_1: String,
}

/// Anything that can produce the full customer list for one export run
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Short label used in logs
    fn source_name(&self) -> &str;

    /// Fetch every customer, in source order
    async fn fetch_all(&self) -> Result<Vec<RawCustomer>>;
}
