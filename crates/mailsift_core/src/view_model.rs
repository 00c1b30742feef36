use crate::{Phase, RecordId, RecordStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub progress_message: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub rows: Vec<ResultRowView>,
    pub total_emails: usize,
    pub url_count: usize,
    pub export_enabled: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn is_processing(&self) -> bool {
        self.phase.is_processing()
    }

    pub fn has_results(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub record_id: RecordId,
    pub url: String,
    pub emails: Vec<String>,
    pub status: RecordStatus,
}

impl ResultRowView {
    /// Emails joined for display, or `None` when nothing was found.
    pub fn emails_label(&self) -> Option<String> {
        if self.emails.is_empty() {
            None
        } else {
            Some(self.emails.join(", "))
        }
    }
}
