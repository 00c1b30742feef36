use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_error, engine_info, engine_warn};

use crate::batch::{run_batch, ChannelProgressSink, ProgressSink};
use crate::export::{export_csv, ExportRecord};
use crate::{EmailExtractor, EngineEvent, RecordId, WorkbookInput};

/// Called after every published event, e.g. to request a UI repaint.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

enum EngineCommand {
    ReadWorkbook(WorkbookInput),
    ScrapeBatch(Vec<(RecordId, String)>),
    ExportCsv {
        path: PathBuf,
        records: Vec<ExportRecord>,
    },
}

/// Handle to the engine worker thread.
///
/// Commands run one at a time in the order they were sent, so a batch never
/// has more than one request in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(extractor: Arc<dyn EmailExtractor>) -> Self {
        Self::with_waker(extractor, None)
    }

    pub fn with_waker(extractor: Arc<dyn EmailExtractor>, waker: Option<Waker>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Engine worker could not start tokio runtime: {}", err);
                    return;
                }
            };
            let sink = ChannelProgressSink::new(event_tx, waker);
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(extractor.clone(), command, &sink));
            }
            engine_info!("Engine worker stopped");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn read_workbook(&self, input: WorkbookInput) {
        self.send(EngineCommand::ReadWorkbook(input));
    }

    pub fn scrape(&self, jobs: Vec<(RecordId, String)>) {
        self.send(EngineCommand::ScrapeBatch(jobs));
    }

    pub fn export_csv(&self, path: PathBuf, records: Vec<ExportRecord>) {
        self.send(EngineCommand::ExportCsv { path, records });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event arrives or the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine worker is not running; command dropped");
        }
    }
}

async fn handle_command(
    extractor: Arc<dyn EmailExtractor>,
    command: EngineCommand,
    sink: &dyn ProgressSink,
) {
    match command {
        EngineCommand::ReadWorkbook(input) => {
            let result = input.read_urls().map_err(|err| err.to_string());
            if let Ok(urls) = &result {
                engine_info!("Workbook read: {} URLs", urls.len());
            }
            sink.emit(EngineEvent::WorkbookRead { result });
        }
        EngineCommand::ScrapeBatch(jobs) => {
            run_batch(extractor, jobs, sink).await;
        }
        EngineCommand::ExportCsv { path, records } => {
            let result = export_csv(&path, &records).map_err(|err| {
                engine_error!("Export to {:?} failed: {}", path, err);
                format!("Failed to export CSV: {err}")
            });
            sink.emit(EngineEvent::ExportFinished { result });
        }
    }
}
