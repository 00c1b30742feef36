use crate::{AppState, Effect, Msg, Phase, RecordOutcome, RecordStatus};

pub const READING_MESSAGE: &str = "Reading Excel file...";
pub const NO_URLS_MESSAGE: &str = "No valid URLs found in the first sheet of the Excel file.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(source) => {
            if state.phase().is_processing() {
                return (state, Vec::new());
            }
            state.begin_reading(READING_MESSAGE);
            vec![Effect::ReadWorkbook(source)]
        }
        Msg::WorkbookRead(result) => {
            // A read result only matters while we are waiting for one.
            if state.phase() != Phase::Reading {
                return (state, Vec::new());
            }
            match result {
                Ok(urls) if urls.is_empty() => {
                    state.fail(NO_URLS_MESSAGE.to_string());
                    Vec::new()
                }
                Ok(urls) => {
                    let jobs = state.begin_processing(urls);
                    vec![Effect::ScrapeUrls(jobs)]
                }
                Err(message) => {
                    state.fail(message);
                    Vec::new()
                }
            }
        }
        Msg::RecordStarted {
            record_id,
            position,
            total,
        } => {
            if state.phase() == Phase::Processing {
                state.mark_started(record_id, position, total);
            }
            Vec::new()
        }
        Msg::RecordDone { record_id, outcome } => {
            let (emails, status) = match outcome {
                RecordOutcome::Success(emails) => (emails, RecordStatus::Success),
                RecordOutcome::Failed => (Vec::new(), RecordStatus::Error),
            };
            state.resolve(record_id, emails, status);
            Vec::new()
        }
        Msg::ProcessingFinished => {
            if state.phase() == Phase::Processing {
                state.finish_processing();
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if !state.phase().is_processing() {
                state.reset();
            }
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.can_export() {
                vec![Effect::ExportCsv(state.results().to_vec())]
            } else {
                Vec::new()
            }
        }
        Msg::ExportFinished(result) => {
            match result {
                Ok(saved) => state.set_notice(format!(
                    "Saved {} rows ({} emails) to {}",
                    saved.rows,
                    saved.emails,
                    saved.path.display()
                )),
                Err(message) => state.set_error(message),
            }
            Vec::new()
        }
    };

    (state, effects)
}
