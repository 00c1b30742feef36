//! MailSift engine: workbook intake, AI email extraction, and CSV export.
mod batch;
mod config;
mod email;
mod engine;
mod export;
mod gemini;
mod persist;
mod sheet;
mod types;

pub use batch::{run_batch, ChannelProgressSink, ProgressSink};
pub use config::{ConfigError, ExtractorSettings, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use email::{filter_emails, is_valid_email, parse_email_payload};
pub use engine::{EngineHandle, Waker};
pub use export::{
    export_csv, to_csv_string, write_csv, ExportError, ExportRecord, ExportSummary,
    DEFAULT_EXPORT_FILENAME,
};
pub use gemini::{build_prompt, EmailExtractor, ExtractError, GeminiExtractor};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use sheet::{read_urls, urls_from_bytes, urls_from_cells, urls_from_grid, SheetError};
pub use types::{EngineEvent, FailureKind, RecordId, WorkbookInput};
