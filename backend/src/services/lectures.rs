//! # Lecture Service Module
//!
//! Teaching sessions and their handouts, under `/api/lectures`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /`** and **`GET /{id}`**: lectures.
//! *   **`POST /`**: `multipart/form-data` with a `json` part
//!     (`LectureInput`) and the handout files.
//! *   **`PUT /{id}`**: edits the lecture fields; files stay as they are.
//! *   **`DELETE /{id}`**: the lecture and its files.
//! *   **`GET /download/{filename}`**: one handout.

use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::web::{self, delete, get, post, put, scope};
use actix_web::{HttpResponse, Scope};
use common::model::lecture::{Lecture, LectureInput};
use common::requests::ApiMessage;
use log::info;

use crate::error::ApiError;
use crate::services::attachments::{self, UploadRoot, LECTURES_DIR};
use crate::services::{new_id, validated};
use crate::store::{collections, Store};

const API_PATH: &str = "/api/lectures";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list))
        .route("", post().to(create))
        .route("/download/{filename}", get().to(download))
        .route("/{id}", get().to(fetch))
        .route("/{id}", put().to(update))
        .route("/{id}", delete().to(remove))
}

fn load(store: &Store, id: &str) -> Result<Lecture, ApiError> {
    store
        .get(collections::LECTURES, id)?
        .ok_or_else(|| ApiError::not_found("lecture", id))
}

async fn list(store: web::Data<Store>) -> Result<HttpResponse, ApiError> {
    let lectures: Vec<Lecture> = store.list(collections::LECTURES, None)?;
    Ok(HttpResponse::Ok().json(lectures))
}

async fn fetch(store: web::Data<Store>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(load(&store, &id)?))
}

async fn create(
    store: web::Data<Store>,
    root: web::Data<UploadRoot>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let dir = root.dir(LECTURES_DIR);
    let upload = attachments::receive::<LectureInput>(payload, &dir).await?;
    let input = upload.meta;
    let lecture = Lecture {
        id: new_id(),
        teacher: input.teacher,
        title: input.title,
        date: input.date,
        location: input.location,
        description: input.description,
        files: upload.files,
    };
    if let Err(e) = store.insert(
        collections::LECTURES,
        &lecture.id,
        Some(&lecture.teacher),
        &lecture,
    ) {
        attachments::remove_files(&dir, &lecture.files).await;
        return Err(e.into());
    }
    info!("created lecture {} '{}'", lecture.id, lecture.title);
    Ok(HttpResponse::Created().json(lecture))
}

async fn update(
    store: web::Data<Store>,
    id: web::Path<String>,
    payload: web::Json<LectureInput>,
) -> Result<HttpResponse, ApiError> {
    let input = validated(payload.into_inner())?;
    let updated = store.modify(collections::LECTURES, &id, |lecture: &mut Lecture| {
        lecture.apply(input);
        Ok::<_, ApiError>(())
    })?;
    let lecture = updated.ok_or_else(|| ApiError::not_found("lecture", &id))?;
    Ok(HttpResponse::Ok().json(lecture))
}

async fn remove(
    store: web::Data<Store>,
    root: web::Data<UploadRoot>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let lecture = load(&store, &id)?;
    attachments::remove_files(&root.dir(LECTURES_DIR), &lecture.files).await;
    store.delete(collections::LECTURES, &id)?;
    info!("deleted lecture {}", id);
    Ok(HttpResponse::Ok().json(ApiMessage {
        message: "lecture deleted".into(),
        reason: None,
    }))
}

async fn download(
    root: web::Data<UploadRoot>,
    filename: web::Path<String>,
) -> Result<NamedFile, ApiError> {
    attachments::open_download(&root.dir(LECTURES_DIR), &filename).await
}
