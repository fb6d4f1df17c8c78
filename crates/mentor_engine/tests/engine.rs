use std::sync::{mpsc, Arc};
use std::time::Duration;

use mentor_core::{AttachedFile, ProbeOutcome, SubmissionOutcome};
use mentor_engine::{BackendSettings, ChannelEventSink, EngineEvent, EngineHandle};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn engine_reports_probe_and_submission_events() {
    mentor_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"response":"done"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let zip = dir.path().join("42.zip");
    std::fs::write(&zip, b"PK").unwrap();

    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(
        &BackendSettings::with_base_url(server.uri()),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine");

    engine.probe(1);
    let (first, rx) = tokio::task::spawn_blocking(move || {
        let first = rx.recv_timeout(WAIT).expect("probe event");
        (first, rx)
    })
    .await
    .unwrap();
    assert_eq!(
        first,
        EngineEvent::ProbeCompleted {
            request_id: 1,
            outcome: ProbeOutcome::Reachable
        }
    );

    engine.submit(2, "help", AttachedFile::new("42.zip", zip));
    let second = tokio::task::spawn_blocking(move || rx.recv_timeout(WAIT).expect("submit event"))
        .await
        .unwrap();
    assert_eq!(
        second,
        EngineEvent::SubmissionCompleted {
            request_id: 2,
            outcome: SubmissionOutcome::Answered {
                response: "done".to_string()
            }
        }
    );
}

#[test]
fn dropping_engine_closes_event_channel() {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(
        &BackendSettings::with_base_url("http://127.0.0.1:9"),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine");
    drop(engine);

    // The sink owned by the engine is released once the runtime stops.
    assert!(rx.recv_timeout(WAIT).is_err());
}
