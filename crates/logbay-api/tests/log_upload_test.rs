//! Log file upload: staging, verification, and parse hand-off.

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::{file_part, md5_hex, setup_test_app};
use serde_json::json;

fn log_form(platform: &str, sdk_version: &str, level: &str, content: &[u8], sum: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("sdkVersion", sdk_version.to_string())
        .add_text("platform", platform.to_string())
        .add_text("uid", "uid-1".to_string())
        .add_text("appId", "app-1".to_string())
        .add_text("loggerName", "main".to_string())
        .add_text("layouts", "{time} {msg}".to_string())
        .add_text("level", level.to_string())
        .add_text("alias", "tester".to_string())
        .add_text("fileSum", sum.to_string())
        .add_part("logFile", file_part(content, "app.log"))
}

#[tokio::test]
async fn valid_upload_responds_ok_and_enqueues_parse_job() {
    let app = setup_test_app();
    let content = b"hello";

    let response = app
        .server
        .post("/log/file/upload")
        .multipart(log_form("android", "1.0", "3", content, &md5_hex(content)))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"result": 0, "description": ""}));

    let jobs = app.wait_for_jobs(1).await;
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];
    assert_eq!(job.level, 3);
    assert_eq!(job.uid, "uid-1");
    assert_eq!(job.app_id, "app-1");
    assert_eq!(job.original_filename, "app.log");
    assert_eq!(job.work_path, app.data_path("tmp"));
}

#[tokio::test]
async fn staged_bytes_match_what_the_client_sent() {
    let app = setup_test_app();
    let content = b"some log lines\nwith content";

    app.server
        .post("/log/file/upload")
        .multipart(log_form("android", "1", "1", content, &md5_hex(content)))
        .await
        .assert_status_ok();

    // The passthrough pipeline merges the staged file into the parsed
    // artifact; its bytes must round-trip exactly.
    let jobs = app.wait_for_jobs(1).await;
    let parsed = jobs[0].parsed_file();
    for _ in 0..200 {
        if parsed.exists() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(std::fs::read(&parsed).unwrap(), content);
}

#[tokio::test]
async fn checksum_mismatch_fails_and_enqueues_nothing() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/log/file/upload")
        .multipart(log_form(
            "android",
            "1.0",
            "3",
            b"actual content",
            "5d41402abc4b2a76b9719d911017c592",
        ))
        .await;

    response.assert_status(axum::http::StatusCode::EXPECTATION_FAILED);
    app.assert_no_jobs().await;
}

#[tokio::test]
async fn unknown_platform_is_rejected_before_any_side_effect() {
    let app = setup_test_app();
    let content = b"hello";

    let response = app
        .server
        .post("/log/file/upload")
        .multipart(log_form("windows", "1.0", "3", content, &md5_hex(content)))
        .await;

    response.assert_status_bad_request();
    assert!(app.no_files_written());
    app.assert_no_jobs().await;
}

#[tokio::test]
async fn unknown_sdk_version_is_rejected_before_any_side_effect() {
    let app = setup_test_app();
    let content = b"hello";

    let response = app
        .server
        .post("/log/file/upload")
        .multipart(log_form("android", "2.0", "3", content, &md5_hex(content)))
        .await;

    response.assert_status_bad_request();
    assert!(app.no_files_written());
    app.assert_no_jobs().await;
}

#[tokio::test]
async fn non_numeric_level_is_a_client_error_with_no_staging() {
    let app = setup_test_app();
    let content = b"hello";

    let response = app
        .server
        .post("/log/file/upload")
        .multipart(log_form("android", "1.0", "verbose", content, &md5_hex(content)))
        .await;

    response.assert_status_bad_request();
    assert!(app.no_files_written());
}

#[tokio::test]
async fn missing_file_part_is_a_client_error() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_text("sdkVersion", "1.0")
        .add_text("platform", "android")
        .add_text("uid", "uid-1")
        .add_text("appId", "app-1")
        .add_text("loggerName", "main")
        .add_text("layouts", "{msg}")
        .add_text("level", "3")
        .add_text("alias", "tester")
        .add_text("fileSum", "00");

    let response = app.server.post("/log/file/upload").multipart(form).await;
    response.assert_status_bad_request();
}
