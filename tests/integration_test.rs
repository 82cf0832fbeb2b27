use doc_analyze_batch::error::JobError;
use doc_analyze_batch::{App, AppError, BatchReport, Config, ItemOutcome};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;

const ANALYZE_PATH: &str = r"^/documentintelligence/documentModels/prebuilt-layout:analyze";

fn app_for(server: &ServerGuard, input: &Path, output: &Path) -> App {
    app_with_token(server, input, output, CancellationToken::new())
}

fn app_with_token(
    server: &ServerGuard,
    input: &Path,
    output: &Path,
    cancel: CancellationToken,
) -> App {
    let config = Config::new(server.url(), "batch-key")
        .with_poll_interval(Duration::from_millis(10))
        .with_dirs(input.to_string_lossy(), output.to_string_lossy());
    App::initialize(config, cancel).expect("初始化应用失败")
}

async fn mock_submit(server: &mut ServerGuard, body: &str, op: &str) -> mockito::Mock {
    let location = format!("{}/operations/{}", server.url(), op);
    server
        .mock("POST", Matcher::Regex(ANALYZE_PATH.to_string()))
        .match_header("ocp-apim-subscription-key", "batch-key")
        .match_body(body)
        .with_status(202)
        .with_header("Operation-Location", &location)
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn batch_isolates_per_item_failures() {
    let mut server = Server::new_async().await;
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("content_json");

    std::fs::write(input.path().join("a.pdf"), "doc-a").unwrap();
    std::fs::write(input.path().join("b.xlsx"), "doc-b").unwrap();
    std::fs::write(input.path().join("c.png"), "doc-c").unwrap();
    std::fs::write(input.path().join("d.pdf"), "").unwrap();
    std::fs::create_dir(input.path().join("nested")).unwrap();

    let submit_a = mock_submit(&mut server, "doc-a", "a").await;
    let submit_b = mock_submit(&mut server, "doc-b", "b").await;
    let submit_c = server
        .mock("POST", Matcher::Regex(ANALYZE_PATH.to_string()))
        .match_body("doc-c")
        .with_status(415)
        .with_body("unsupported media type")
        .expect(1)
        .create_async()
        .await;
    let submit_d = server
        .mock("POST", Matcher::Regex(ANALYZE_PATH.to_string()))
        .match_body("")
        .with_status(400)
        .with_body("empty document")
        .expect(1)
        .create_async()
        .await;

    let success_body = r#"{"status":"succeeded","analyzeResult":{"content":"hello"}}"#;
    server
        .mock("GET", "/operations/a")
        .match_header("ocp-apim-subscription-key", "batch-key")
        .with_status(200)
        .with_body(success_body)
        .create_async()
        .await;
    server
        .mock("GET", "/operations/b")
        .with_status(200)
        .with_body(r#"{"status":"failed","error":{"code":"InternalServerError"}}"#)
        .create_async()
        .await;

    let app = app_for(&server, input.path(), &out_dir);
    let report = assert_ok!(app.run().await);

    let summary = match report {
        BatchReport::Completed(summary) => summary,
        other => panic!("expected a completed batch, got {:?}", other),
    };
    assert_eq!(summary.total(), 4);
    assert_eq!(summary.saved(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.rejected(), 2);

    let names: Vec<_> = summary.outcomes.iter().map(|(i, _)| i.name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.xlsx", "c.png", "d.pdf"]);

    assert_eq!(
        summary.outcomes[2].1,
        ItemOutcome::Rejected {
            status: 415,
            body: "unsupported media type".to_string(),
        }
    );
    // 空文件同样提交给服务，由服务给出结果
    assert_eq!(
        summary.outcomes[3].1,
        ItemOutcome::Rejected {
            status: 400,
            body: "empty document".to_string(),
        }
    );

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("a.json")).unwrap()).unwrap();
    let expected: Value = serde_json::from_str(success_body).unwrap();
    assert_eq!(written, expected);

    let files: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(files.len(), 1, "只有成功的文档才写出结果");

    submit_a.assert_async().await;
    submit_b.assert_async().await;
    submit_c.assert_async().await;
    submit_d.assert_async().await;
}

#[tokio::test]
async fn missing_input_dir_exits_cleanly_without_submitting() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("out").join("nested");

    let app = app_for(&server, &tmp.path().join("input_documents"), &out_dir);
    let report = assert_ok!(app.run().await);

    assert_eq!(
        report,
        BatchReport::InputDirMissing(tmp.path().join("input_documents"))
    );
    assert!(out_dir.is_dir(), "输出目录应在扫描前创建");
    submit.assert_async().await;
}

#[tokio::test]
async fn empty_input_dir_exits_cleanly_without_submitting() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let app = app_for(&server, input.path(), output.path());
    let report = assert_ok!(app.run().await);

    assert_eq!(report, BatchReport::NoInputFiles(input.path().to_path_buf()));
    submit.assert_async().await;
}

#[tokio::test]
async fn protocol_error_aborts_the_batch() {
    let mut server = Server::new_async().await;
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("1.pdf"), "doc-1").unwrap();
    std::fs::write(input.path().join("2.pdf"), "doc-2").unwrap();

    mock_submit(&mut server, "doc-1", "1").await;
    let second = server
        .mock("POST", Matcher::Regex(ANALYZE_PATH.to_string()))
        .match_body("doc-2")
        .expect(0)
        .create_async()
        .await;
    server
        .mock("GET", "/operations/1")
        .with_status(500)
        .with_body(json!({"error": "boom"}).to_string())
        .create_async()
        .await;

    let app = app_for(&server, input.path(), output.path());
    let err = app.run().await.unwrap_err();

    assert!(matches!(err, AppError::Api(_)));
    second.assert_async().await;
}

#[tokio::test]
async fn cancelled_batch_submits_nothing() {
    let mut server = Server::new_async().await;
    let submit = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    for name in ["1.pdf", "2.pdf", "3.pdf"] {
        std::fs::write(input.path().join(name), "doc").unwrap();
    }

    let cancel = CancellationToken::new();
    cancel.cancel();
    let app = app_with_token(&server, input.path(), output.path(), cancel);

    match app.run().await {
        Err(AppError::Job(JobError::Cancelled { polls })) => assert_eq!(polls, 0),
        other => panic!("unexpected: {:?}", other),
    }
    submit.assert_async().await;
}
