//! CSV export of scraped records.
//!
//! Each run writes one file to the output directory:
//!
//! ```text
//! output_dir/
//! ├── eluniversal_2025_05_06_articles.csv
//! └── udistrital_2025_05_06_ud_programs.csv
//! ```
//!
//! Columns come from [`Exportable::HEADERS`], a fixed list per record type
//! that drives both the header row and the data rows.

use crate::models::{Article, Program};
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

/// A record type that can be written as one CSV row.
pub trait Exportable {
    /// Distinguishes the output file of this record type, e.g. `articles`.
    const FILE_SUFFIX: &'static str;
    /// Column names, in output order.
    const HEADERS: &'static [&'static str];

    /// Field values in the same order as [`Self::HEADERS`].
    fn row(&self) -> Vec<&str>;
}

impl Exportable for Article {
    const FILE_SUFFIX: &'static str = "articles";
    const HEADERS: &'static [&'static str] = &["body", "publication_date", "title", "url"];

    fn row(&self) -> Vec<&str> {
        vec![
            self.body.as_str(),
            self.publication_date.as_str(),
            self.title.as_str(),
            self.url.as_str(),
        ]
    }
}

impl Exportable for Program {
    const FILE_SUFFIX: &'static str = "ud_programs";
    const HEADERS: &'static [&'static str] = &["description", "faculty", "name", "url"];

    fn row(&self) -> Vec<&str> {
        vec![
            self.description.as_str(),
            self.faculty.as_str(),
            self.name.as_str(),
            self.url.as_str(),
        ]
    }
}

/// `{site_id}_{YYYY_MM_DD}_{suffix}.csv`
pub fn output_file_name(site_id: &str, date: NaiveDate, suffix: &str) -> String {
    format!("{site_id}_{}_{suffix}.csv", date.format("%Y_%m_%d"))
}

/// Serialize `records` to CSV text: one header row, then one row per record.
pub fn to_csv<R: Exportable>(records: &[R]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(R::HEADERS)?;
    for record in records {
        writer.write_record(record.row())?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Write `records` for `site_id` into `output_dir`.
///
/// An existing file for the same site and date is overwritten.
///
/// # Arguments
///
/// * `output_dir` - Directory the file is created in
/// * `site_id` - Site identifier, used in the file name
/// * `date` - Run date, used in the file name as `YYYY_MM_DD`
/// * `records` - The records to export, in output order
///
/// # Returns
///
/// The path of the written file, or `None` when `records` is empty (no
/// file is created in that case).
///
/// # Output Path
///
/// `{output_dir}/{site_id}_{YYYY_MM_DD}_{R::FILE_SUFFIX}.csv`
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
#[instrument(level = "info", skip(records), fields(count = records.len(), kind = R::FILE_SUFFIX))]
pub async fn write_records<R: Exportable>(
    output_dir: &Path,
    site_id: &str,
    date: NaiveDate,
    records: &[R],
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    if records.is_empty() {
        warn!("Nothing to export");
        return Ok(None);
    }

    let path = output_dir.join(output_file_name(site_id, date, R::FILE_SUFFIX));
    let bytes = to_csv(records)?;
    fs::write(&path, bytes).await?;
    info!(path = %path.display(), rows = records.len(), "Wrote CSV file");
    Ok(Some(path))
}
