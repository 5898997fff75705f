//! Application accounts under `/api/users`.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use common::model::user::User;

use crate::services::crud;

const API_PATH: &str = "/api/users";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(crud::list::<User>))
        .route("", post().to(crud::create::<User>))
        .route("/{id}", get().to(crud::get::<User>))
        .route("/{id}", put().to(crud::update::<User>))
        .route("/{id}", delete().to(crud::delete::<User>))
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{self, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn user_lifecycle() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": "admin1", "displayName": "Admin", "role": "admin" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .set_json(json!({ "username": "admin1", "displayName": "Head admin", "role": "teacher" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["role"], "teacher");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/users/{}", id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}", id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unknown_role_is_a_bad_request() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": "x123", "displayName": "X", "role": "root" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }
}
