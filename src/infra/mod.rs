pub mod http_client;
pub mod snapshot_store;
