//! MailSift core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, RecordOutcome, SavedExport, WorkbookSource};
pub use state::{AppState, Phase, RecordId, RecordStatus, ScrapeResult};
pub use update::{update, NO_URLS_MESSAGE, READING_MESSAGE};
pub use view_model::{AppViewModel, ResultRowView};
