//! # Trainer Action Service Module
//!
//! Per-trainer action log with attachments, under `/api/trainer-actions`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /?trainer=`**: the log, optionally one trainer's.
//! *   **`POST /`**: `multipart/form-data` with a `json` part
//!     (`NewTrainerAction`) and up to ten `files` parts.
//! *   **`GET /download/{filename}`**: one stored attachment.
//! *   **`DELETE /{id}`**: the entry and its files.

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;
use common::model::action::TrainerAction;

use crate::services::event_log;

const API_PATH: &str = "/api/trainer-actions";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(event_log::list::<TrainerAction>))
        .route("", post().to(event_log::create::<TrainerAction>))
        .route(
            "/download/{filename}",
            get().to(event_log::download::<TrainerAction>),
        )
        .route("/{id}", delete().to(event_log::delete::<TrainerAction>))
}

#[cfg(test)]
mod tests {
    use crate::services::attachments::{ACTIONS_DIR, MAX_FILE_SIZE};
    use crate::services::test_support::{self, multipart_body, multipart_content_type, test_app};
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use serde_json::{json, Value};

    fn stored_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir.join(ACTIONS_DIR)).unwrap().count()
    }

    #[actix_web::test]
    async fn upload_download_and_delete() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let body = multipart_body(
            &json!({ "trainer": "t1", "description": "late for the shift", "date": "1402/09/01" }),
            &[("note.pdf", &b"%PDF-1.4 first"[..]), ("scan.png", &b"png bytes"[..])],
        );
        let req = test::TestRequest::post()
            .uri("/api/trainer-actions")
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let files = created["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["originalName"], "note.pdf");
        assert_eq!(stored_files(dir.path()), 2);

        let stored_name = files[0]["filename"].as_str().unwrap();
        let req = test::TestRequest::get()
            .uri(&format!("/api/trainer-actions/download/{}", stored_name))
            .to_request();
        let bytes = test::call_and_read_body(&app, req).await;
        assert_eq!(&bytes[..], b"%PDF-1.4 first");

        let req = test::TestRequest::get()
            .uri("/api/trainer-actions?trainer=t1")
            .to_request();
        let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 1);

        let id = created["_id"].as_str().unwrap();
        let req = test::TestRequest::delete()
            .uri(&format!("/api/trainer-actions/{}", id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(stored_files(dir.path()), 0);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/trainer-actions/{}", id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn traversal_names_are_refused() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        for name in ["a..b.pdf", "..%2F..%2Fetc%2Fpasswd", "..%5Cwin.ini"] {
            let req = test::TestRequest::get()
                .uri(&format!("/api/trainer-actions/download/{}", name))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{name}");
        }
    }

    #[actix_web::test]
    async fn invalid_metadata_keeps_no_files() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let body = multipart_body(
            &json!({ "trainer": "t1", "description": "" }),
            &[("note.pdf", &b"bytes"[..])],
        );
        let req = test::TestRequest::post()
            .uri("/api/trainer-actions")
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(stored_files(dir.path()), 0);
    }

    #[actix_web::test]
    async fn more_than_ten_files_are_refused() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let names: Vec<String> = (0..11).map(|i| format!("f{}.txt", i)).collect();
        let files: Vec<(&str, &[u8])> = names.iter().map(|n| (n.as_str(), &b"x"[..])).collect();
        let body = multipart_body(&json!({ "trainer": "t1", "description": "many" }), &files);
        let req = test::TestRequest::post()
            .uri("/api/trainer-actions")
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(stored_files(dir.path()), 0);
    }

    #[actix_web::test]
    async fn oversized_file_discards_the_whole_submission() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let big = vec![0u8; MAX_FILE_SIZE + 1];
        let body = multipart_body(
            &json!({ "trainer": "t1", "description": "too big" }),
            &[("ok.txt", &b"small"[..]), ("big.bin", &big[..])],
        );
        let req = test::TestRequest::post()
            .uri("/api/trainer-actions")
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(stored_files(dir.path()), 0);

        let req = test::TestRequest::get().uri("/api/trainer-actions").to_request();
        let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(listed.is_empty());
    }
}
