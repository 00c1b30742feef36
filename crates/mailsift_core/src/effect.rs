use crate::{RecordId, ScrapeResult, WorkbookSource};

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ReadWorkbook(WorkbookSource),
    /// Scrape every URL in order, one at a time.
    ScrapeUrls(Vec<(RecordId, String)>),
    ExportCsv(Vec<ScrapeResult>),
}
