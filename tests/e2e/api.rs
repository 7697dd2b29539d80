use super::*;
use detectai::api::{ApiClient, ApiError, Tool, UploadFile};
use detectai::panel::{self, Analyzer, Completion, Explainer, Panel, Scanner, ViewState};

#[tokio::test]
async fn rejection_body_is_passed_through_untouched() {
    let backend = StubBackend::start();
    let client = ApiClient::new(&backend.url).unwrap();

    let body = client
        .submit_text(Tool::Analyze, "this is not code")
        .await
        .unwrap();

    assert_eq!(body, json!({ "errorMsg": "not valid source code" }));
}

#[tokio::test]
async fn upload_forwards_file_name_and_bytes() {
    let backend = StubBackend::start();
    let client = ApiClient::new(&backend.url).unwrap();
    let file = UploadFile::new("lib.rs", b"pub fn a() {}".to_vec());

    let body = client.submit_file(Tool::Summarize, &file).await.unwrap();

    assert_eq!(body["summarization"]["summary"], "lib.rs:13");
}

#[tokio::test]
async fn error_status_becomes_status_error() {
    let backend = StubBackend::start();
    let client = ApiClient::new(&backend.url).unwrap();

    let error = client
        .submit_text(Tool::SecurityScan, "explode()")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn non_json_success_body_becomes_decode_error() {
    let backend = StubBackend::start();
    let client = ApiClient::new(&backend.url).unwrap();

    let error = client
        .submit_text(Tool::Analyze, "<html>")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Decode { .. }));
}

#[tokio::test]
async fn non_json_success_body_leaves_panel_failed() {
    let backend = StubBackend::start();
    let client = ApiClient::new(&backend.url).unwrap();
    let mut panel = Panel::<Analyzer>::new();

    panel.set_input("<html>");
    let ticket = panel.submit_text().unwrap();

    assert_eq!(panel::drive(&client, &mut panel, ticket).await, Completion::Applied);

    let message = panel.failure().unwrap();
    assert!(message.contains("not valid JSON"), "{message}");
    assert!(panel.result().is_none());
    assert!(!panel.invalid_input());
}

#[tokio::test]
async fn closed_port_becomes_transport_error() {
    let client = ApiClient::new(&closed_backend_url()).unwrap();

    let error = client.submit_text(Tool::Optimize, "x").await.unwrap_err();

    assert!(matches!(error, ApiError::Transport { .. }));
}

#[tokio::test]
async fn panel_drives_a_real_round_trip() {
    let backend = StubBackend::start();
    let client = ApiClient::new(&backend.url).unwrap();
    let mut panel = Panel::<Scanner>::new();

    panel.set_input("eval(input())");
    let ticket = panel.submit_text().unwrap();
    assert!(panel.loading());

    let completion = panel::drive(&client, &mut panel, ticket).await;

    assert_eq!(completion, Completion::Applied);
    let result = panel.result().unwrap();
    assert_eq!(result.vulnerabilities.len(), 1);
    assert_eq!(panel.section_keys(), vec!["vulnerability-1", "recommendations"]);
}

#[tokio::test]
async fn older_response_never_overwrites_newer_one() {
    let backend = StubBackend::start();
    let client = ApiClient::new(&backend.url).unwrap();
    let mut panel = Panel::<Explainer>::new();

    panel.set_input("fn first() {}");
    let first = panel.submit_text().unwrap();

    panel.select_file(UploadFile::new("second.rs", b"fn second() {}".to_vec()));
    let second = panel.submit_file().unwrap();

    let second_body = client.submit(second.tool(), second.request()).await;
    assert_eq!(panel.complete(&second, second_body), Completion::Applied);

    let first_body = client.submit(first.tool(), first.request()).await;
    assert_eq!(panel.complete(&first, first_body), Completion::Stale);

    match panel.state() {
        ViewState::Succeeded(result) => assert_eq!(result.summary, "second.rs:14"),
        other => panic!("unexpected state {other:?}"),
    }
    assert_eq!(backend.hits(), 2);
}
