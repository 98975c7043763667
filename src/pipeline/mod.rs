// Export pipeline: record source -> mapping and filtering -> CSV sink

pub mod processing;
pub mod sink;

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::types::{RawCustomer, RecordSource};
use processing::{to_contact_book, EntryMapper};

/// Where and how a run writes its contact book
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub output_path: PathBuf,
    pub mapper: EntryMapper,
}

impl PipelineOptions {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            output_path: PathBuf::from(&config.output_path),
            mapper: EntryMapper::new(config.group_name.clone(), config.second_phone),
        }
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub source: String,
    pub total_customers: usize,
    pub entries_written: usize,
    pub customers_skipped: usize,
    pub contacts_skipped: usize,
    pub output_file: String,
}

pub struct Pipeline;

impl Pipeline {
    /// Fetch everything from `source`, then transform and write it
    #[instrument(skip(source, options), fields(source_name = %source.source_name()))]
    pub async fn run(source: &dyn RecordSource, options: &PipelineOptions) -> Result<PipelineResult> {
        let customers = source.fetch_all().await?;
        let mut result = Self::export(&customers, options)?;
        result.source = source.source_name().to_string();
        Ok(result)
    }

    /// Transform already fetched customers and write the CSV
    pub fn export(customers: &[RawCustomer], options: &PipelineOptions) -> Result<PipelineResult> {
        let book = to_contact_book(customers, &options.mapper);
        info!(
            "Transformed {} customers into {} entries ({} customers skipped, {} contacts skipped)",
            book.stats.customers_seen,
            book.entries.len(),
            book.stats.customers_skipped,
            book.stats.contacts_skipped
        );

        let entries_written = sink::write_csv(&options.output_path, &book.entries)?;

        Ok(PipelineResult {
            source: String::new(),
            total_customers: book.stats.customers_seen,
            entries_written,
            customers_skipped: book.stats.customers_skipped,
            contacts_skipped: book.stats.contacts_skipped,
            output_file: options.output_path.display().to_string(),
        })
    }
}
