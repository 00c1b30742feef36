use std::io::Write;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;

use crate::persist::{AtomicFileWriter, PersistError};

pub const DEFAULT_EXPORT_FILENAME: &str = "scraped_emails.csv";

const HEADER: [&str; 2] = ["URL", "Email"];

/// One URL and the emails found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub url: String,
    pub emails: Vec<String>,
}

impl ExportRecord {
    /// Number of CSV rows this record produces.
    pub fn row_count(&self) -> usize {
        self.emails.len().max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Data rows, excluding the header.
    pub rows: usize,
    pub emails: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Writes `URL,Email` followed by one row per (url, email) pair; URLs without
/// emails get a single row with an empty email. Returns the number of data rows.
pub fn write_csv<W: Write>(writer: W, records: &[ExportRecord]) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for record in records {
        if record.emails.is_empty() {
            csv_writer.write_record([record.url.as_str(), ""])?;
            rows += 1;
            continue;
        }
        for email in &record.emails {
            csv_writer.write_record([record.url.as_str(), email.as_str()])?;
            rows += 1;
        }
    }
    csv_writer.flush()?;
    Ok(rows)
}

pub fn to_csv_string(records: &[ExportRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    // csv only emits the UTF-8 we handed it.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Atomically writes the CSV export to `path`.
pub fn export_csv(path: &Path, records: &[ExportRecord]) -> Result<ExportSummary, ExportError> {
    let mut buffer = Vec::new();
    let rows = write_csv(&mut buffer, records)?;

    let (writer, file_name) = AtomicFileWriter::for_target(path)?;
    let written = writer.write(&file_name, &buffer)?;
    let emails = records.iter().map(|r| r.emails.len()).sum();

    engine_info!(
        "Exported {} rows ({} emails) to {}",
        rows,
        emails,
        written.display()
    );
    Ok(ExportSummary {
        path: written,
        rows,
        emails,
    })
}
