//! # Trainer Progress Service Module
//!
//! Endpoints around a trainer's year-by-year history, under
//! `/api/trainerProgress`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /{trainer_id}`**: the progress record (`save::get`).
//! *   **`PUT /{trainer_id}`**: creates or replaces the record (`save::put`).
//! *   **`POST /{trainer_id}/years`**: opens a new training year and makes it
//!     current (`save::open_year`).
//! *   **`PUT /{trainer_id}/years/{year_label}/forms/{form_type}`**: links a
//!     form document into a year's slot (`link::process`).
//! *   **`GET /{trainer_id}/forms/{form_type}?year=`**: resolves the trainer,
//!     year and form type to the form document (`resolve::process`). A miss
//!     answers 404 with a `reason` naming the step that failed.

pub mod link;
mod resolve;
mod save;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;
use common::model::form_kind::FormKind;

use crate::error::ApiError;

const API_PATH: &str = "/api/trainerProgress";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{trainer_id}", get().to(save::get))
        .route("/{trainer_id}", put().to(save::put))
        .route("/{trainer_id}/years", post().to(save::open_year))
        .route(
            "/{trainer_id}/years/{year_label}/forms/{form_type}",
            put().to(link::process),
        )
        .route("/{trainer_id}/forms/{form_type}", get().to(resolve::process))
}

pub(crate) fn parse_kind(tag: &str) -> Result<FormKind, ApiError> {
    tag.parse::<FormKind>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
