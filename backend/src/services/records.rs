//! # Record Service Module
//!
//! Conference, monograph, monograph-evaluation and teacher-activity records.
//! Their bodies have no fixed shape and are stored as sent; the only rule is
//! that a record names its trainer or teacher.
//!
//! ## Registered Routes (per record kind, under `/api/<collection>`):
//!
//! *   **`GET /?trainer=`**: all records, optionally one owner's.
//! *   **`POST /`**: stores a record and answers it with its new `_id`.
//! *   **`GET /{id}`** and **`PUT /{id}`**: read and replace one record.

use actix_web::web::{self, get, post, put, scope};
use actix_web::{HttpResponse, Scope};
use common::model::record::{self, RecordKind};
use common::requests::TrainerFilter;
use log::info;
use serde_json::{Map, Value};
use validator::ValidationErrors;

use crate::error::ApiError;
use crate::services::new_id;
use crate::store::Store;

type Body = Map<String, Value>;

pub fn configure_routes() -> Vec<Scope> {
    RecordKind::ALL
        .iter()
        .map(|&kind| {
            scope(&kind.route())
                .app_data(web::Data::new(kind))
                .route("", get().to(list))
                .route("", post().to(create))
                .route("/{id}", get().to(fetch))
                .route("/{id}", put().to(update))
        })
        .collect()
}

fn owner_of(body: &Body) -> Result<String, ApiError> {
    record::owner(body).map(str::to_string).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("owner", e);
        ApiError::Validation(errors)
    })
}

async fn list(
    store: web::Data<Store>,
    kind: web::Data<RecordKind>,
    filter: web::Query<TrainerFilter>,
) -> Result<HttpResponse, ApiError> {
    let records: Vec<Body> = store.list(kind.collection(), filter.trainer.as_deref())?;
    Ok(HttpResponse::Ok().json(records))
}

async fn create(
    store: web::Data<Store>,
    kind: web::Data<RecordKind>,
    payload: web::Json<Body>,
) -> Result<HttpResponse, ApiError> {
    let mut body = payload.into_inner();
    let owner = owner_of(&body)?;
    let id = new_id();
    body.insert("_id".into(), Value::String(id.clone()));
    store.insert(kind.collection(), &id, Some(&owner), &body)?;
    info!("created {} record {}", kind.collection(), id);
    Ok(HttpResponse::Created().json(body))
}

async fn fetch(
    store: web::Data<Store>,
    kind: web::Data<RecordKind>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let body: Body = store
        .get(kind.collection(), &id)?
        .ok_or_else(|| ApiError::not_found(kind.collection(), &id))?;
    Ok(HttpResponse::Ok().json(body))
}

async fn update(
    store: web::Data<Store>,
    kind: web::Data<RecordKind>,
    id: web::Path<String>,
    payload: web::Json<Body>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let mut body = payload.into_inner();
    let owner = owner_of(&body)?;
    body.insert("_id".into(), Value::String(id.clone()));
    if !store.replace(kind.collection(), &id, Some(&owner), &body)? {
        return Err(ApiError::not_found(kind.collection(), &id));
    }
    Ok(HttpResponse::Ok().json(body))
}
