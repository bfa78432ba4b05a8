use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use topicforge_core::{ContentBlock, GenerationMode, GenerationRequest, GenerationStep, RunId};
use topicforge_engine::{ClientSettings, EngineConfig, EngineEvent, EngineHandle, PipelineError};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "content": text } }]
    }))
}

fn engine_for(server: &MockServer) -> EngineHandle {
    EngineHandle::new(EngineConfig {
        client: ClientSettings {
            endpoint: format!("{}/v1/chat/completions", server.uri()),
            ..ClientSettings::default()
        },
        ..EngineConfig::default()
    })
    .expect("engine starts")
}

/// Drains events until the run with `run_id` completes.
async fn events_until_done(engine: &EngineHandle, run_id: RunId) -> Vec<EngineEvent> {
    let engine = engine.clone();
    tokio::task::spawn_blocking(move || {
        let mut events = Vec::new();
        while let Ok(event) = engine.recv_timeout(Duration::from_secs(10)) {
            let done = matches!(
                &event,
                EngineEvent::GenerationCompleted { run_id: id, .. } if *id == run_id
            );
            events.push(event);
            if done {
                break;
            }
        }
        events
    })
    .await
    .expect("receiver task")
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_run_reports_each_step_then_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("one per line"))
        .respond_with(reply("Footwork"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("standalone explanation"))
        .respond_with(reply("Stay light on your feet."))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let request = GenerationRequest::new(
        "Boxing",
        "sk-test",
        "gpt-4o-mini",
        GenerationMode::SectionExpansion,
    );
    engine.generate(7, request);

    let events = events_until_done(&engine, 7).await;
    assert_eq!(
        events,
        vec![
            EngineEvent::Progress {
                run_id: 7,
                step: GenerationStep::Outline
            },
            EngineEvent::Progress {
                run_id: 7,
                step: GenerationStep::Bodies
            },
            EngineEvent::Progress {
                run_id: 7,
                step: GenerationStep::Done
            },
            EngineEvent::GenerationCompleted {
                run_id: 7,
                result: Ok(vec![ContentBlock::new(
                    "Footwork",
                    "Stay light on your feet."
                )]),
            },
        ]
    );
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_run_completes_with_the_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let request =
        GenerationRequest::new("Boxing", "sk-test", "gpt-4o-mini", GenerationMode::FullDocument);
    engine.generate(3, request);

    let events = events_until_done(&engine, 3).await;
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        EngineEvent::Progress {
            run_id: 3,
            step: GenerationStep::Outline
        }
    );
    match &events[1] {
        EngineEvent::GenerationCompleted {
            run_id: 3,
            result: Err(PipelineError::Upstream { step, .. }),
        } => assert_eq!(*step, GenerationStep::Outline),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_request_completes_without_progress() {
    let server = MockServer::start().await;
    let engine = engine_for(&server);
    let request = GenerationRequest::new("Boxing", " ", "gpt-4o-mini", GenerationMode::FullDocument);
    engine.generate(1, request);

    let events = events_until_done(&engine, 1).await;
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        EngineEvent::GenerationCompleted {
            run_id: 1,
            result: Err(PipelineError::InvalidInput(_)),
        }
    ));
}
