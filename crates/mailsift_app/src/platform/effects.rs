use engine_logging::engine_info;
use mailsift_core::{Effect, Msg, RecordOutcome, SavedExport, ScrapeResult, WorkbookSource};
use mailsift_engine::{
    EngineEvent, EngineHandle, ExportRecord, WorkbookInput, DEFAULT_EXPORT_FILENAME,
};

/// Executes core effects against the engine and the native dialogs.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::ReadWorkbook(source) => {
                engine_info!("Reading workbook {}", source.display_name());
                self.engine.read_workbook(workbook_input(source));
            }
            Effect::ScrapeUrls(jobs) => self.engine.scrape(jobs),
            Effect::ExportCsv(results) => {
                let Some(path) = rfd::FileDialog::new()
                    .set_title("Save scraped emails")
                    .set_file_name(DEFAULT_EXPORT_FILENAME)
                    .add_filter("CSV", &["csv"])
                    .save_file()
                else {
                    engine_info!("Export cancelled");
                    return;
                };
                self.engine.export_csv(path, export_records(&results));
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.engine.try_recv()
    }
}

fn workbook_input(source: WorkbookSource) -> WorkbookInput {
    match source {
        WorkbookSource::Path(path) => WorkbookInput::Path(path),
        WorkbookSource::Bytes { bytes, .. } => WorkbookInput::Bytes(bytes),
    }
}

fn export_records(results: &[ScrapeResult]) -> Vec<ExportRecord> {
    results
        .iter()
        .map(|result| ExportRecord {
            url: result.url.clone(),
            emails: result.emails.clone(),
        })
        .collect()
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::WorkbookRead { result } => Msg::WorkbookRead(result),
        EngineEvent::RecordStarted {
            record_id,
            position,
            total,
        } => Msg::RecordStarted {
            record_id,
            position,
            total,
        },
        EngineEvent::RecordCompleted { record_id, result } => Msg::RecordDone {
            record_id,
            outcome: match result {
                Ok(emails) => RecordOutcome::Success(emails),
                Err(_) => RecordOutcome::Failed,
            },
        },
        EngineEvent::BatchFinished => Msg::ProcessingFinished,
        EngineEvent::ExportFinished { result } => {
            Msg::ExportFinished(result.map(|summary| SavedExport {
                path: summary.path,
                rows: summary.rows,
                emails: summary.emails,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use mailsift_core::RecordStatus;
    use mailsift_engine::{ExportSummary, FailureKind};

    use super::*;

    #[test]
    fn completed_records_map_to_outcomes() {
        let ok = event_to_msg(EngineEvent::RecordCompleted {
            record_id: 2,
            result: Ok(vec!["a@b.com".into()]),
        });
        assert_eq!(
            ok,
            Msg::RecordDone {
                record_id: 2,
                outcome: RecordOutcome::Success(vec!["a@b.com".into()]),
            }
        );

        let failed = event_to_msg(EngineEvent::RecordCompleted {
            record_id: 3,
            result: Err(FailureKind::TaskFailed),
        });
        assert_eq!(
            failed,
            Msg::RecordDone {
                record_id: 3,
                outcome: RecordOutcome::Failed,
            }
        );
    }

    #[test]
    fn record_started_keeps_batch_position() {
        let msg = event_to_msg(EngineEvent::RecordStarted {
            record_id: 4,
            position: 5,
            total: 9,
        });
        assert_eq!(
            msg,
            Msg::RecordStarted {
                record_id: 4,
                position: 5,
                total: 9,
            }
        );
    }

    #[test]
    fn export_summary_keeps_path_and_counts() {
        let msg = event_to_msg(EngineEvent::ExportFinished {
            result: Ok(ExportSummary {
                path: PathBuf::from("out.csv"),
                rows: 3,
                emails: 2,
            }),
        });
        assert_eq!(
            msg,
            Msg::ExportFinished(Ok(SavedExport {
                path: PathBuf::from("out.csv"),
                rows: 3,
                emails: 2,
            }))
        );
    }

    #[test]
    fn batch_finished_ends_processing() {
        assert_eq!(event_to_msg(EngineEvent::BatchFinished), Msg::ProcessingFinished);
    }

    #[test]
    fn dropped_bytes_keep_their_contents() {
        let bytes: Arc<[u8]> = Arc::from(&b"PK\x03\x04"[..]);
        let input = workbook_input(WorkbookSource::Bytes {
            name: "urls.xlsx".into(),
            bytes: bytes.clone(),
        });
        assert_eq!(input, WorkbookInput::Bytes(bytes));
    }

    #[test]
    fn results_become_export_records_in_order() {
        let results = vec![
            ScrapeResult {
                url: "https://a.com".into(),
                emails: vec!["x@a.com".into()],
                status: RecordStatus::Success,
            },
            ScrapeResult {
                url: "https://b.com".into(),
                emails: Vec::new(),
                status: RecordStatus::Error,
            },
        ];
        let records = export_records(&results);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "https://a.com");
        assert_eq!(records[1].row_count(), 1);
    }
}
