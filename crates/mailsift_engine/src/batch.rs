use std::sync::{mpsc, Arc};

use engine_logging::{engine_info, engine_warn};

use crate::{EmailExtractor, EngineEvent, FailureKind, RecordId};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Forwards events over a channel and pokes the waker so the UI repaints.
pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
    waker: Option<crate::Waker>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>, waker: Option<crate::Waker>) -> Self {
        Self { tx, waker }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

/// Scrapes every URL strictly in order, one request at a time.
///
/// Each record gets a `RecordStarted` and exactly one `RecordCompleted`; a failed
/// record never stops the ones after it. Returns the number of records processed.
pub async fn run_batch(
    extractor: Arc<dyn EmailExtractor>,
    jobs: Vec<(RecordId, String)>,
    sink: &dyn ProgressSink,
) -> usize {
    let total = jobs.len();
    engine_info!("Batch started: {} URLs", total);

    for (index, (record_id, url)) in jobs.into_iter().enumerate() {
        sink.emit(EngineEvent::RecordStarted {
            record_id,
            position: index + 1,
            total,
        });

        // Spawned so that a panicking extractor only fails its own record.
        let task = tokio::spawn({
            let extractor = extractor.clone();
            let url = url.clone();
            async move { extractor.extract(&url).await }
        });

        let result = match task.await {
            Ok(Ok(emails)) => {
                engine_info!("Record {} ok: {} emails from {}", record_id, emails.len(), url);
                Ok(emails)
            }
            Ok(Err(err)) => {
                engine_warn!("Record {} failed for {}: {}", record_id, url, err);
                Err(FailureKind::Extraction(err.to_string()))
            }
            Err(join_err) => {
                engine_warn!("Record {} task failed for {}: {}", record_id, url, join_err);
                Err(FailureKind::TaskFailed)
            }
        };

        sink.emit(EngineEvent::RecordCompleted { record_id, result });
    }

    engine_info!("Batch finished: {} URLs", total);
    sink.emit(EngineEvent::BatchFinished);
    total
}
