//! Attachment upload: deterministic naming, intentional overwrite, and the
//! acknowledged no-op when the name does not derive.

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::{file_part, md5_hex, setup_test_app};
use serde_json::json;

fn attachment_form(attachment_id: &str, content: &[u8], sum: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("sdkVersion", "1.0")
        .add_text("platform", "android")
        .add_text("uid", "uid-1".to_string())
        .add_text("appId", "app-1".to_string())
        .add_text("fileSum", sum.to_string())
        .add_text("attachmentId", attachment_id.to_string())
        .add_part("attachmentFile", file_part(content, "shot.jpg"))
}

#[tokio::test]
async fn attachment_lands_under_its_deterministic_name() {
    let app = setup_test_app();
    let content = b"jpeg bytes";

    let response = app
        .server
        .post("/log/attachment/upload")
        .multipart(attachment_form("att-7", content, &md5_hex(content)))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"result": 0, "description": ""}));

    let path = app.data_path("attachment/android_uid-1_app-1_att-7.jpg");
    assert_eq!(std::fs::read(&path).unwrap(), content);
}

#[tokio::test]
async fn reupload_of_the_same_id_replaces_the_artifact() {
    let app = setup_test_app();
    let first = b"first image";
    let second = b"second image with more bytes";

    app.server
        .post("/log/attachment/upload")
        .multipart(attachment_form("att-7", first, &md5_hex(first)))
        .await
        .assert_status_ok();
    app.server
        .post("/log/attachment/upload")
        .multipart(attachment_form("att-7", second, &md5_hex(second)))
        .await
        .assert_status_ok();

    let path = app.data_path("attachment/android_uid-1_app-1_att-7.jpg");
    assert_eq!(std::fs::read(&path).unwrap(), second);
}

#[tokio::test]
async fn different_ids_never_collide() {
    let app = setup_test_app();
    let a = b"image a";
    let b = b"image b";

    app.server
        .post("/log/attachment/upload")
        .multipart(attachment_form("1", a, &md5_hex(a)))
        .await
        .assert_status_ok();
    app.server
        .post("/log/attachment/upload")
        .multipart(attachment_form("2", b, &md5_hex(b)))
        .await
        .assert_status_ok();

    assert_eq!(
        std::fs::read(app.data_path("attachment/android_uid-1_app-1_1.jpg")).unwrap(),
        a
    );
    assert_eq!(
        std::fs::read(app.data_path("attachment/android_uid-1_app-1_2.jpg")).unwrap(),
        b
    );
}

#[tokio::test]
async fn empty_attachment_id_is_an_acknowledged_noop() {
    let app = setup_test_app();
    let content = b"image";

    let response = app
        .server
        .post("/log/attachment/upload")
        .multipart(attachment_form("", content, &md5_hex(content)))
        .await;

    // Wire compatibility: success is reported even though nothing landed.
    response.assert_status_ok();
    response.assert_json(&json!({"result": 0, "description": ""}));
    assert!(!app.data_path("attachment").exists());
}

#[tokio::test]
async fn checksum_mismatch_fails_the_upload() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/log/attachment/upload")
        .multipart(attachment_form(
            "att-7",
            b"image bytes",
            "ffffffffffffffffffffffffffffffff",
        ))
        .await;

    response.assert_status(axum::http::StatusCode::EXPECTATION_FAILED);
}
