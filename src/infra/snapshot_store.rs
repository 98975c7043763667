use crate::app::ports::SnapshotStorePort;
use crate::error::Result;
use crate::types::{RawCustomer, RecordSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// On-disk layout of a customer snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub subdomain: String,
    pub record_count: usize,
    pub customers: Vec<RawCustomer>,
}

/// Stores raw customers as pretty-printed JSON for offline inspection
pub struct JsonSnapshotStore {
    path: PathBuf,
    subdomain: String,
}

impl JsonSnapshotStore {
    pub fn new(path: impl AsRef<Path>, subdomain: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            subdomain: subdomain.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStorePort for JsonSnapshotStore {
    #[instrument(skip(self, customers), fields(path = %self.path.display(), count = customers.len()))]
    async fn save(&self, customers: &[RawCustomer]) -> Result<()> {
        let snapshot = Snapshot {
            captured_at: Utc::now(),
            subdomain: self.subdomain.clone(),
            record_count: customers.len(),
            customers: customers.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        tokio::fs::write(&self.path, bytes).await?;
        info!("Wrote snapshot of {} customers", customers.len());
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<RawCustomer>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        if snapshot.record_count != snapshot.customers.len() {
            warn!(
                "Snapshot header says {} customers but file holds {}",
                snapshot.record_count,
                snapshot.customers.len()
            );
        }
        info!(
            "Loaded {} customers captured {} from '{}'",
            snapshot.customers.len(),
            snapshot.captured_at,
            snapshot.subdomain
        );
        Ok(snapshot.customers)
    }
}

#[async_trait]
impl RecordSource for JsonSnapshotStore {
    fn source_name(&self) -> &str {
        "snapshot"
    }

    async fn fetch_all(&self) -> Result<Vec<RawCustomer>> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::types::RawContact;
    use tempfile::tempdir;

    fn sample() -> Vec<RawCustomer> {
        vec![
            RawCustomer {
                id: Some(1),
                business_name: Some("Acme Inc".into()),
                phone: Some("555-1000".into()),
                contacts: Some(vec![RawContact {
                    name: Some("Bob".into()),
                    phone: Some("555-2000".into()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            RawCustomer {
                firstname: Some("Jane".into()),
                lastname: Some("Doe".into()),
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn save_then_load_preserves_records_and_order() {
        let dir = tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("customers.json"), "acme");

        store.save(&sample()).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn snapshot_serves_as_record_source() {
        let dir = tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("customers.json"), "acme");
        store.save(&sample()).await.unwrap();

        let source: &dyn RecordSource = &store;
        assert_eq!(source.source_name(), "snapshot");
        assert_eq!(source.fetch_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_snapshot_is_io_error() {
        let dir = tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("absent.json"), "acme");
        assert!(matches!(store.load().await, Err(ExportError::Io(_))));
    }

    #[tokio::test]
    async fn malformed_snapshot_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customers.json");
        std::fs::write(&path, b"{\"customers\": 3}").unwrap();
        let store = JsonSnapshotStore::new(&path, "acme");
        assert!(matches!(store.load().await, Err(ExportError::Json(_))));
    }
}
