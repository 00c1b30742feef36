use crate::view_model::{AppViewModel, ResultRowView};

/// Index of a record in the result list.
pub type RecordId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordStatus {
    #[default]
    Pending,
    Success,
    Error,
}

/// One URL's tracked scrape status and found emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    pub url: String,
    pub emails: Vec<String>,
    pub status: RecordStatus,
}

impl ScrapeResult {
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            emails: Vec::new(),
            status: RecordStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Reading,
    Processing,
    Finished,
}

impl Phase {
    pub fn is_processing(self) -> bool {
        matches!(self, Phase::Reading | Phase::Processing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    results: Vec<ScrapeResult>,
    progress: Option<String>,
    error: Option<String>,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn results(&self) -> &[ScrapeResult] {
        &self.results
    }

    pub fn total_emails(&self) -> usize {
        self.results.iter().map(|r| r.emails.len()).sum()
    }

    /// Export needs at least one email and an idle engine.
    pub fn can_export(&self) -> bool {
        !self.phase.is_processing() && self.total_emails() > 0
    }

    pub fn view(&self) -> AppViewModel {
        let total_emails = self.total_emails();
        AppViewModel {
            phase: self.phase,
            progress_message: self.progress.clone(),
            error: self.error.clone(),
            notice: self.notice.clone(),
            rows: self
                .results
                .iter()
                .enumerate()
                .map(|(record_id, result)| ResultRowView {
                    record_id,
                    url: result.url.clone(),
                    emails: result.emails.clone(),
                    status: result.status,
                })
                .collect(),
            total_emails,
            url_count: self.results.len(),
            export_enabled: self.can_export(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_reading(&mut self, progress: &str) {
        self.phase = Phase::Reading;
        self.results.clear();
        self.error = None;
        self.notice = None;
        self.progress = Some(progress.to_string());
        self.dirty = true;
    }

    /// Creates one pending record per URL, in order, and enters `Processing`.
    pub(crate) fn begin_processing(&mut self, urls: Vec<String>) -> Vec<(RecordId, String)> {
        self.phase = Phase::Processing;
        self.results = urls.iter().map(ScrapeResult::pending).collect();
        self.dirty = true;
        urls.into_iter().enumerate().collect()
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.phase = Phase::Idle;
        self.error = Some(message);
        self.progress = None;
        self.dirty = true;
    }

    pub(crate) fn mark_started(&mut self, record_id: RecordId, position: usize, total: usize) {
        let Some(record) = self.results.get(record_id) else {
            return;
        };
        self.progress = Some(format!("Scraping {position} of {total}: {}", record.url));
        self.dirty = true;
    }

    /// Resolves a pending record. Returns false if the record is unknown or already resolved.
    pub(crate) fn resolve(
        &mut self,
        record_id: RecordId,
        emails: Vec<String>,
        status: RecordStatus,
    ) -> bool {
        let Some(record) = self.results.get_mut(record_id) else {
            return false;
        };
        if record.status != RecordStatus::Pending || status == RecordStatus::Pending {
            return false;
        }
        record.emails = emails;
        record.status = status;
        self.dirty = true;
        true
    }

    pub(crate) fn finish_processing(&mut self) {
        self.phase = Phase::Finished;
        self.progress = None;
        self.dirty = true;
    }

    pub(crate) fn reset(&mut self) {
        let dirty = self.dirty
            || self.phase != Phase::Idle
            || !self.results.is_empty()
            || self.error.is_some()
            || self.notice.is_some();
        *self = Self::default();
        self.dirty = dirty;
    }

    pub(crate) fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.dirty = true;
    }
}
