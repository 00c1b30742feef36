use std::path::PathBuf;
use std::sync::Arc;

/// Where an uploaded workbook comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbookSource {
    /// Picked from the file dialog, or dropped with a known path.
    Path(PathBuf),
    /// Dropped with its contents already in memory.
    Bytes { name: String, bytes: Arc<[u8]> },
}

impl WorkbookSource {
    pub fn display_name(&self) -> String {
        match self {
            WorkbookSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            WorkbookSource::Bytes { name, .. } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Success(Vec<String>),
    Failed,
}

/// A finished CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedExport {
    pub path: PathBuf,
    /// Data rows, excluding the header.
    pub rows: usize,
    pub emails: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User dropped or picked a spreadsheet.
    FileSelected(WorkbookSource),
    /// Engine finished reading the workbook: URL list or a user-facing error.
    WorkbookRead(Result<Vec<String>, String>),
    /// Engine started the request for a record, the `position`-th (1-based) of `total`.
    RecordStarted {
        record_id: crate::RecordId,
        position: usize,
        total: usize,
    },
    /// Engine resolved the request for a record.
    RecordDone {
        record_id: crate::RecordId,
        outcome: RecordOutcome,
    },
    /// Engine ran out of URLs.
    ProcessingFinished,
    /// User clicked "Start New".
    ResetClicked,
    /// User clicked "Download CSV".
    ExportClicked,
    /// Export completed, or failed with a user-facing error.
    ExportFinished(Result<SavedExport, String>),
}
