/// RepairShopr API and FreePBX contact book constants shared across the crate.

// RepairShopr API
pub const CUSTOMERS_PATH: &str = "/api/v1/customers";
pub const CUSTOMERS_SORT: &str = "lastname ASC";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Environment overrides
pub const ENV_SUBDOMAIN: &str = "RS_SUBDOMAIN";
pub const ENV_TOKEN: &str = "RS_TOKEN";

// Contact book
pub const DEFAULT_GROUP_NAME: &str = "RepairShopr";
pub const GROUP_TYPE: &str = "external";
pub const DISPLAY_PREFIX: &str = "RS ";
pub const PHONE_TYPE_WORK: &str = "Work";
pub const PHONE_TYPE_MOBILE: &str = "Mobile";

// Files
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_OUTPUT_PATH: &str = "customers.csv";
pub const DEFAULT_SNAPSHOT_PATH: &str = "customers.json";

/// Base URL for a RepairShopr tenant.
pub fn tenant_base_url(subdomain: &str) -> String {
    format!("https://{}.repairshopr.com", subdomain)
}
