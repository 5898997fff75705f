//! # Reward/Punishment Service Module
//!
//! Same surface as the action log, under `/api/trainer-reward-punishment`;
//! each entry additionally says whether it is a reward or a punishment.

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;
use common::model::action::TrainerRewardPunishment;

use crate::services::event_log;

const API_PATH: &str = "/api/trainer-reward-punishment";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(event_log::list::<TrainerRewardPunishment>))
        .route("", post().to(event_log::create::<TrainerRewardPunishment>))
        .route(
            "/download/{filename}",
            get().to(event_log::download::<TrainerRewardPunishment>),
        )
        .route(
            "/{id}",
            delete().to(event_log::delete::<TrainerRewardPunishment>),
        )
}

#[cfg(test)]
mod tests {
    use crate::services::attachments::REWARD_PUNISHMENT_DIR;
    use crate::services::test_support::{self, multipart_body, multipart_content_type, test_app};
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn reward_with_file_then_delete() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let body = multipart_body(
            &json!({ "trainer": "t1", "kind": "reward", "description": "best presentation" }),
            &[("certificate.jpg", &b"jpeg"[..])],
        );
        let req = test::TestRequest::post()
            .uri("/api/trainer-reward-punishment")
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["kind"], "reward");
        assert_eq!(created["files"][0]["size"], 4);
        assert!(created["createdAt"].as_str().is_some());

        let uploads = dir.path().join(REWARD_PUNISHMENT_DIR);
        assert_eq!(std::fs::read_dir(&uploads).unwrap().count(), 1);

        let req = test::TestRequest::delete()
            .uri(&format!(
                "/api/trainer-reward-punishment/{}",
                created["_id"].as_str().unwrap()
            ))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(std::fs::read_dir(&uploads).unwrap().count(), 0);
    }

    #[actix_web::test]
    async fn unknown_kind_is_rejected() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let body = multipart_body(
            &json!({ "trainer": "t1", "kind": "bonus", "description": "x" }),
            &[],
        );
        let req = test::TestRequest::post()
            .uri("/api/trainer-reward-punishment")
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
