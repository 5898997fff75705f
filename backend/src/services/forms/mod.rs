//! # Evaluation Form Service Module
//!
//! CRUD endpoints for every form type. Each [`FormKind`] gets its own scope
//! at [`FormKind::route`] (`/api/evaluationFormC` ... `/api/evaluationFormK`,
//! `/api/rotation-form-r`, `/api/checklists`), all served by the same
//! handlers; the scope hands its kind to them as app data.
//!
//! ## Registered Routes (per form type):
//!
//! *   **`GET /?trainer=`**: documents of the form type, optionally one
//!     trainer's (`list::process`).
//! *   **`POST /?link=`**: validates and stores a new document. With
//!     `link=true` it is also written into the trainer's progress for its
//!     `yearLabel` (`create::process`).
//! *   **`GET /{id}`**: one document (`get::process`).
//! *   **`PUT /{id}`**: replaces a document (`update::process`).

mod create;
mod get;
mod list;
mod update;

use actix_web::web::{self, get, post, put, scope};
use actix_web::Scope;
use common::model::form::FormDocument;
use common::model::form_kind::FormKind;
use common::score;

use crate::error::ApiError;
use crate::services::validated;

pub fn configure_routes() -> Vec<Scope> {
    FormKind::ALL
        .iter()
        .map(|&kind| {
            scope(kind.route())
                .app_data(web::Data::new(kind))
                .route("", get().to(list::process))
                .route("", post().to(create::process))
                .route("/{id}", get().to(get::process))
                .route("/{id}", put().to(update::process))
        })
        .collect()
}

/// Validation plus the server-side average and row totals.
fn prepare(doc: FormDocument) -> Result<FormDocument, ApiError> {
    let mut doc = validated(doc)?;
    score::snapshot(&mut doc).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(doc)
}
