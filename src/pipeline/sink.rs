//! CSV sink for flat records.
//!
//! The header row comes from the field order of the first record. Rows are
//! written to a temporary file next to the destination and moved into place
//! only once everything has been flushed, so a failed run never leaves a
//! truncated file behind.

use std::path::Path;

use metrics::counter;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, instrument};

use crate::error::{ExportError, Result};

/// Writes `records` to `path`, replacing any existing file.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// `ExportError::EmptyExport` when `records` is empty, since there is no
/// record to take the column layout from. No file is created in that case.
#[instrument(skip_all, fields(path = %path.as_ref().display(), rows = records.len()))]
pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> Result<usize> {
    let path = path.as_ref();
    if records.is_empty() {
        return Err(ExportError::EmptyExport);
    }

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let temp_file = NamedTempFile::new_in(parent)?;

    let mut writer = csv::Writer::from_writer(temp_file);
    for record in records {
        writer.serialize(record)?;
    }
    let temp_file = writer.into_inner().map_err(|e| e.into_error())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    counter!("rs_entries_written_total").increment(records.len() as u64);
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContactEntry;
    use tempfile::tempdir;

    #[derive(Serialize)]
    struct Row {
        b: &'static str,
        a: &'static str,
    }

    #[test]
    fn header_follows_first_record_field_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows = write_csv(&path, &[Row { b: "1", a: "2" }, Row { b: "3", a: "x,y" }]).unwrap();

        assert_eq!(rows, 2);
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["b,a", "1,2", "3,\"x,y\""]);
    }

    #[test]
    fn contact_entries_get_eleven_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customers.csv");
        let entry = ContactEntry {
            groupname: "RepairShopr".into(),
            grouptype: "external".into(),
            displayname: "RS Jane Doe".into(),
            phone_1_number: "555-3000".into(),
            phone_1_type: "Work".into(),
            ..Default::default()
        };

        write_csv(&path, &[entry]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "groupname,grouptype,displayname,fname,lname,company,phone_1_number,phone_1_type,phone_2_number,phone_2_type,email_1"
        );
        assert_eq!(
            lines.next().unwrap(),
            "RepairShopr,external,RS Jane Doe,,,,555-3000,Work,,,"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_input_is_an_error_and_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customers.csv");

        let err = write_csv::<ContactEntry>(&path, &[]).unwrap_err();

        assert!(matches!(err, ExportError::EmptyExport));
        assert!(!path.exists());
    }

    #[test]
    fn existing_file_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are longer than the new file\n").unwrap();

        write_csv(&path, &[Row { b: "1", a: "2" }]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["b,a", "1,2"]);
    }

    #[test]
    fn empty_input_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "b,a\n1,2\n").unwrap();

        assert!(write_csv::<Row>(&path, &[]).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "b,a\n1,2\n");
    }
}
