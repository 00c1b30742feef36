use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use mailsift_engine::{
    EmailExtractor, EngineEvent, EngineHandle, ExportRecord, ExtractError, WorkbookInput,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct FixedExtractor;

#[async_trait]
impl EmailExtractor for FixedExtractor {
    async fn extract(&self, url: &str) -> Result<Vec<String>, ExtractError> {
        Ok(vec![format!("hello@{}", url.trim_start_matches("https://"))])
    }
}

fn engine() -> EngineHandle {
    EngineHandle::new(Arc::new(FixedExtractor))
}

#[test]
fn scrape_streams_events_until_batch_finished() {
    let engine = engine();
    engine.scrape(vec![(0, "https://a.com".into()), (1, "https://b.com".into())]);

    let mut events = Vec::new();
    while let Some(event) = engine.recv() {
        let done = matches!(event, EngineEvent::BatchFinished);
        events.push(event);
        if done {
            break;
        }
    }

    assert_eq!(events.len(), 5);
    assert_eq!(
        events[3],
        EngineEvent::RecordCompleted {
            record_id: 1,
            result: Ok(vec!["hello@b.com".to_string()]),
        }
    );
}

#[test]
fn unreadable_workbook_reports_error_message() {
    let temp = TempDir::new().unwrap();
    let engine = engine();
    engine.read_workbook(WorkbookInput::Path(temp.path().join("missing.xlsx")));

    match engine.recv() {
        Some(EngineEvent::WorkbookRead { result }) => {
            assert_eq!(result, Err("Error reading file.".to_string()));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn export_reports_written_path() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("emails.csv");
    let engine = engine();
    engine.export_csv(
        target.clone(),
        vec![ExportRecord {
            url: "https://a.com".into(),
            emails: vec!["x@a.com".into()],
        }],
    );

    match engine.recv() {
        Some(EngineEvent::ExportFinished { result: Ok(summary) }) => {
            assert_eq!(summary.path, target);
            assert_eq!(summary.rows, 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn waker_fires_for_every_event() {
    let wakes = Arc::new(AtomicUsize::new(0));
    let waker: mailsift_engine::Waker = {
        let wakes = wakes.clone();
        Arc::new(move || {
            wakes.fetch_add(1, Ordering::SeqCst);
        })
    };
    let engine = EngineHandle::with_waker(Arc::new(FixedExtractor), Some(waker));
    engine.scrape(vec![(0, "https://a.com".into())]);

    let mut seen = 0;
    while let Some(event) = engine.recv() {
        seen += 1;
        if matches!(event, EngineEvent::BatchFinished) {
            break;
        }
    }

    assert_eq!(seen, 3);
    // the waker runs just after each send
    let deadline = Instant::now() + Duration::from_secs(2);
    while wakes.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(wakes.load(Ordering::SeqCst), 3);
}
