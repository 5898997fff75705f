//! Generic create/read/update/delete handlers for the plain JSON resources
//! (trainers, teachers, users, vacancies).
//!
//! A resource opts in by implementing [`Document`]; its scope then routes
//! to `crud::create::<T>`, `crud::get::<T>` and so on.

use actix_web::{web, HttpResponse};
use common::model::teacher::Teacher;
use common::model::trainer::Trainer;
use common::model::user::User;
use common::model::vacancy::Vacancy;
use common::requests::ApiMessage;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::error::ApiError;
use crate::services::{new_id, validated};
use crate::store::{collections, Store};

pub trait Document: Serialize + DeserializeOwned + Validate + 'static {
    const COLLECTION: &'static str;
    /// Used in not-found messages.
    const NAME: &'static str;

    fn set_id(&mut self, id: String);
}

impl Document for Trainer {
    const COLLECTION: &'static str = collections::TRAINERS;
    const NAME: &'static str = "trainer";

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Document for Teacher {
    const COLLECTION: &'static str = collections::TEACHERS;
    const NAME: &'static str = "teacher";

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Document for User {
    const COLLECTION: &'static str = collections::USERS;
    const NAME: &'static str = "user";

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Document for Vacancy {
    const COLLECTION: &'static str = collections::VACANCIES;
    const NAME: &'static str = "vacancy";

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Validates, assigns a fresh id and stores `doc`.
pub fn insert_new<T: Document>(store: &Store, doc: T) -> Result<T, ApiError> {
    let mut doc = validated(doc)?;
    let id = new_id();
    doc.set_id(id.clone());
    store.insert(T::COLLECTION, &id, None, &doc)?;
    info!("created {} {}", T::NAME, id);
    Ok(doc)
}

pub fn load<T: Document>(store: &Store, id: &str) -> Result<T, ApiError> {
    store
        .get(T::COLLECTION, id)?
        .ok_or_else(|| ApiError::not_found(T::NAME, id))
}

pub async fn create<T: Document>(
    store: web::Data<Store>,
    payload: web::Json<T>,
) -> Result<HttpResponse, ApiError> {
    let doc = insert_new(&store, payload.into_inner())?;
    Ok(HttpResponse::Created().json(doc))
}

/// Every stored document. These resources have no owner, so there is no
/// `?trainer=` filter.
pub async fn list<T: Document>(store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let docs: Vec<T> = store.list(T::COLLECTION, None)?;
    Ok(HttpResponse::Ok().json(docs))
}

pub async fn get<T: Document>(
    store: web::Data<Store>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let doc: T = load(&store, &id)?;
    Ok(HttpResponse::Ok().json(doc))
}

/// Whole-document replace; the id in the path wins over one in the body.
pub async fn update<T: Document>(
    store: web::Data<Store>,
    id: web::Path<String>,
    payload: web::Json<T>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let mut doc = validated(payload.into_inner())?;
    doc.set_id(id.clone());
    if !store.replace(T::COLLECTION, &id, None, &doc)? {
        return Err(ApiError::not_found(T::NAME, &id));
    }
    Ok(HttpResponse::Ok().json(doc))
}

pub async fn delete<T: Document>(
    store: web::Data<Store>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if !store.delete(T::COLLECTION, &id)? {
        return Err(ApiError::not_found(T::NAME, &id));
    }
    info!("deleted {} {}", T::NAME, id);
    Ok(HttpResponse::Ok().json(ApiMessage {
        message: format!("{} deleted", T::NAME),
        reason: None,
    }))
}
