use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::export::ExportSummary;

pub type RecordId = usize;

/// A workbook handed to the engine for reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbookInput {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Workbook read finished. Errors are already user-facing messages.
    WorkbookRead { result: Result<Vec<String>, String> },
    RecordStarted {
        record_id: RecordId,
        /// 1-based position within the batch.
        position: usize,
        total: usize,
    },
    RecordCompleted {
        record_id: RecordId,
        result: Result<Vec<String>, FailureKind>,
    },
    BatchFinished,
    ExportFinished { result: Result<ExportSummary, String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The extractor reported an error.
    Extraction(String),
    /// The extraction task panicked or was aborted.
    TaskFailed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Extraction(message) => write!(f, "extraction failed: {message}"),
            FailureKind::TaskFailed => write!(f, "extraction task failed"),
        }
    }
}
