use mailsift_core::{update, AppState, Msg, RecordOutcome};

#[test]
fn engine_events_on_fresh_state_are_noops() {
    let msgs = [
        Msg::WorkbookRead(Ok(vec!["https://a.com".into()])),
        Msg::RecordStarted {
            record_id: 0,
            position: 1,
            total: 1,
        },
        Msg::RecordDone {
            record_id: 0,
            outcome: RecordOutcome::Success(vec!["x@a.com".into()]),
        },
        Msg::ProcessingFinished,
    ];

    for msg in msgs {
        let state = AppState::new();
        let (mut next, effects) = update(state.clone(), msg.clone());

        assert_eq!(state, next, "{msg:?} changed a fresh state");
        assert!(effects.is_empty());
        assert!(!next.consume_dirty());
    }
}

#[test]
fn export_without_results_is_noop() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::ExportClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
