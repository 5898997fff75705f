use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose, Engine as _};
use common::model::progress::TrainerProgress;
use common::model::trainer::Trainer;
use log::{info, warn};

use crate::error::ApiError;
use crate::services::crud::Document;
use crate::services::{new_id, validated};
use crate::store::{collections, Store};

pub async fn process(
    store: web::Data<Store>,
    payload: web::Json<Trainer>,
) -> Result<HttpResponse, ApiError> {
    let trainer = register_trainer(&store, payload.into_inner())?;
    Ok(HttpResponse::Created().json(trainer))
}

pub async fn update(
    store: web::Data<Store>,
    id: web::Path<String>,
    payload: web::Json<Trainer>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let mut trainer = validated(payload.into_inner())?;
    check_photo(&trainer)?;
    trainer.set_id(id.clone());
    if !store.replace(Trainer::COLLECTION, &id, None, &trainer)? {
        return Err(ApiError::not_found(Trainer::NAME, &id));
    }
    Ok(HttpResponse::Ok().json(trainer))
}

/// Stores the trainer and opens their progress record. If the progress
/// record cannot be written, the trainer is deleted again.
pub fn register_trainer(store: &Store, trainer: Trainer) -> Result<Trainer, ApiError> {
    register_as(store, new_id(), trainer)
}

fn register_as(store: &Store, id: String, trainer: Trainer) -> Result<Trainer, ApiError> {
    check_photo(&trainer)?;
    let mut trainer = validated(trainer)?;
    trainer.set_id(id.clone());
    store.insert(Trainer::COLLECTION, &id, None, &trainer)?;
    info!("created trainer {}", id);

    let progress = TrainerProgress::starting(id.clone(), trainer.training_year.clone());
    if let Err(e) = store.insert(collections::TRAINER_PROGRESS, &id, Some(&id), &progress) {
        warn!("opening progress for trainer {} failed, removing it: {}", id, e);
        store.delete(Trainer::COLLECTION, &id)?;
        return Err(e.into());
    }
    info!(
        "opened progress for trainer {} in year '{}'",
        id, progress.current_training_year
    );
    Ok(trainer)
}

/// The photo, when sent, must be base64 (optionally as a data URL).
fn check_photo(trainer: &Trainer) -> Result<(), ApiError> {
    let Some(photo) = trainer.photo.as_deref() else {
        return Ok(());
    };
    let encoded = match photo.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => photo,
    };
    general_purpose::STANDARD
        .decode(encoded.trim())
        .map(|_| ())
        .map_err(|e| ApiError::BadRequest(format!("photo is not valid base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::register_as;
    use crate::services::crud::Document;
    use crate::services::test_support::{self, test_app};
    use crate::store::collections;
    use common::model::progress::TrainerProgress;
    use common::model::trainer::Trainer;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    fn registration() -> Value {
        json!({
            "firstName": "Sara",
            "lastName": "Karimi",
            "parentName": "Ali",
            "province": "Tehran",
            "department": "Surgery",
            "trainingYear": "سال اول",
            "phone": "09120000000",
            "email": "sara@example.org"
        })
    }

    #[actix_web::test]
    async fn registration_opens_progress_for_the_current_year() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/trainers")
            .set_json(registration())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let trainer: Value = test::read_body_json(resp).await;
        let id = trainer["_id"].as_str().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/trainerProgress/{}", id))
            .to_request();
        let progress: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(progress["currentTrainingYear"], "سال اول");
        assert_eq!(progress["trainingHistory"][0]["yearLabel"], "سال اول");
    }

    #[::core::prelude::v1::test]
    fn failed_progress_leaves_no_trainer_behind() {
        let store = test_support::store();
        store
            .insert(
                collections::TRAINER_PROGRESS,
                "taken",
                Some("taken"),
                &TrainerProgress::starting("taken", "سال اول"),
            )
            .unwrap();
        let trainer: Trainer = serde_json::from_value(registration()).unwrap();

        assert!(register_as(&store, "taken".into(), trainer).is_err());
        let stored: Option<Trainer> = store.get(Trainer::COLLECTION, "taken").unwrap();
        assert!(stored.is_none());
    }

    #[actix_web::test]
    async fn invalid_photo_is_rejected() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let mut body = registration();
        body["photo"] = json!("data:image/png;base64,@@not base64@@");
        let req = test::TestRequest::post()
            .uri("/api/trainers")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_required_fields_store_nothing() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let mut body = registration();
        body["firstName"] = json!("  ");
        let req = test::TestRequest::post()
            .uri("/api/trainers")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/trainers").to_request();
        let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(all.is_empty());
    }

    #[actix_web::test]
    async fn update_replaces_the_record() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        let req = test::TestRequest::post()
            .uri("/api/trainers")
            .set_json(registration())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["_id"].as_str().unwrap().to_string();

        let mut edited = registration();
        edited["department"] = json!("Internal medicine");
        let req = test::TestRequest::put()
            .uri(&format!("/api/trainers/{}", id))
            .set_json(edited)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/trainers/{}", id))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched["department"], "Internal medicine");
        assert_eq!(fetched["_id"], id.as_str());
    }
}
