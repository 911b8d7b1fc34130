//! Table export to CSV and JSON files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::builders::Dataset;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `rows` as CSV with a header row derived from the record fields.
///
/// `None` values become empty cells.
pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `rows` as a JSON array of record objects.
pub fn write_json<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

/// Exports named tables into an output directory.
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Creates an exporter, creating the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `<name>.csv`.
    pub fn to_csv<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join(format!("{name}.csv"));
        let mut writer = BufWriter::new(File::create(&path)?);
        write_csv(&mut writer, rows)?;
        writer.flush()?;

        info!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(path)
    }

    /// Writes `<name>.json` as an array of records.
    pub fn to_json<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join(format!("{name}.json"));
        let mut writer = BufWriter::new(File::create(&path)?);
        write_json(&mut writer, rows)?;
        writer.flush()?;

        info!("Wrote {} records to {}", rows.len(), path.display());
        Ok(path)
    }

    /// Exports every table as CSV plus customers and transactions as JSON.
    pub fn export_dataset(&self, dataset: &Dataset) -> Result<Vec<PathBuf>, ExportError> {
        let paths = vec![
            self.to_csv("customers", &dataset.customers)?,
            self.to_csv("companies", &dataset.companies)?,
            self.to_csv("accounts", &dataset.accounts)?,
            self.to_csv("transactions", &dataset.transactions)?,
            self.to_csv("edges", &dataset.edges)?,
            self.to_json("customers", &dataset.customers)?,
            self.to_json("transactions", &dataset.transactions)?,
        ];
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::DatasetBuilder;
    use time::macros::datetime;

    fn dataset() -> Dataset {
        DatasetBuilder::smoke_test()
            .with_as_of(datetime!(2024-06-01 0:00 UTC))
            .build()
    }

    #[test]
    fn test_csv_headers_match_schema() {
        let dataset = dataset();
        let mut buf = Vec::new();
        write_csv(&mut buf, &dataset.customers).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "customer_id,first_name,last_name,email,phone,address,country,date_of_birth,employer_company_id"
        );
        assert_eq!(text.lines().count(), 11);

        let mut buf = Vec::new();
        write_csv(&mut buf, &dataset.edges).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("source_id,target_id,relationship_type\n"));
        assert!(text.contains(",owns_account\n"));
    }

    #[test]
    fn test_csv_date_formats() {
        let dataset = dataset();

        let mut buf = Vec::new();
        write_csv(&mut buf, &dataset.transactions).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        // RFC 3339 timestamp in UTC
        assert!(row.contains('T') && row.contains('Z'), "row: {row}");

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let parsed: Vec<crate::generators::Transaction> =
            reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed, dataset.transactions);
    }

    #[test]
    fn test_json_records() {
        let dataset = dataset();
        let mut buf = Vec::new();
        write_json(&mut buf, &dataset.customers).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0]["customer_id"], "CUST_000001");

        let dob = records[0]["date_of_birth"].as_str().unwrap();
        assert_eq!(dob.len(), 10);
        assert_eq!(&dob[4..5], "-");
    }

    #[test]
    fn test_export_dataset_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("out")).unwrap();
        let paths = exporter.export_dataset(&dataset()).unwrap();

        assert_eq!(paths.len(), 7);
        for name in [
            "customers.csv",
            "companies.csv",
            "accounts.csv",
            "transactions.csv",
            "edges.csv",
            "customers.json",
            "transactions.json",
        ] {
            assert!(exporter.output_dir().join(name).exists(), "{name} missing");
        }
    }
}
