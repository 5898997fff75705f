use actix_web::{web, HttpResponse};
use common::model::form::FormDocument;
use common::model::form_kind::FormKind;
use log::info;

use super::prepare;
use crate::error::ApiError;
use crate::store::Store;

/// Whole-document replace. Last write wins.
pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<FormKind>,
    id: web::Path<String>,
    payload: web::Json<FormDocument>,
) -> Result<HttpResponse, ApiError> {
    let kind = **kind;
    let id = id.into_inner();
    let mut doc = prepare(payload.into_inner())?;
    doc.id = Some(id.clone());
    if !store.replace(kind.collection(), &id, Some(&doc.trainer), &doc)? {
        return Err(ApiError::not_found(kind.title(), &id));
    }
    info!("updated form {} {}", kind, id);
    Ok(HttpResponse::Ok().json(doc))
}

#[cfg(test)]
mod tests {
    use crate::services::forms::fixtures;
    use crate::services::test_support::{self, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn update_recomputes_the_average() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/evaluationFormE")
            .set_json(fixtures::form(
                "t1",
                json!([{ "label": "a", "score": "10", "grader": "Dr. A" }]),
            ))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["_id"].as_str().unwrap().to_string();

        let mut edited = fixtures::form(
            "t1",
            json!([
                { "label": "a", "score": "10", "grader": "Dr. A" },
                { "label": "b", "score": "20", "grader": "Dr. B" }
            ]),
        );
        edited["_id"] = json!("ignored");
        let req = test::TestRequest::put()
            .uri(&format!("/api/evaluationFormE/{}", id))
            .set_json(edited)
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["_id"], id.as_str());
        assert_eq!(updated["average"], 15.0);
    }

    #[actix_web::test]
    async fn updating_a_missing_form_is_404() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let req = test::TestRequest::put()
            .uri("/api/evaluationFormE/nope")
            .set_json(fixtures::form("t1", json!([])))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
