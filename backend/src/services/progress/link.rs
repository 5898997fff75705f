//! Writes a form document's id into a year entry of its trainer's progress.
//!
//! A slot holds at most one document. Re-linking the same id is a no-op;
//! linking a different id over an occupied slot is refused with 409 so an
//! existing evaluation is never silently orphaned.

use actix_web::{web, HttpResponse};
use common::model::form::FormDocument;
use common::model::form_kind::FormKind;
use common::model::progress::TrainerProgress;
use common::progress::NotFound;
use common::requests::LinkFormRequest;
use log::info;

use crate::error::ApiError;
use crate::services::progress::parse_kind;
use crate::services::validated;
use crate::store::{collections, Store};

pub async fn process(
    store: web::Data<Store>,
    path: web::Path<(String, String, String)>,
    payload: web::Json<LinkFormRequest>,
) -> Result<HttpResponse, ApiError> {
    let (trainer_id, year_label, form_type) = path.into_inner();
    let kind = parse_kind(&form_type)?;
    let request = validated(payload.into_inner())?;
    let progress = link_form(&store, &trainer_id, &year_label, kind, &request.form_id)?;
    Ok(HttpResponse::Ok().json(progress))
}

pub fn link_form(
    store: &Store,
    trainer_id: &str,
    year_label: &str,
    kind: FormKind,
    form_id: &str,
) -> Result<TrainerProgress, ApiError> {
    let form: FormDocument = store
        .get(kind.collection(), form_id)?
        .ok_or_else(|| ApiError::not_found(kind.title(), form_id))?;
    if form.trainer != trainer_id {
        return Err(ApiError::BadRequest(format!(
            "form {} belongs to another trainer",
            form_id
        )));
    }

    let updated = store.modify(
        collections::TRAINER_PROGRESS,
        trainer_id,
        |progress: &mut TrainerProgress| {
            let entry = progress
                .year_mut(year_label)
                .ok_or_else(|| NotFound::YearEntry {
                    year: year_label.to_string(),
                })?;
            match entry.forms.get(kind) {
                Some(existing) if existing != form_id => Err(ApiError::Conflict(format!(
                    "year '{}' already has form {} ({})",
                    year_label, kind, existing
                ))),
                _ => {
                    entry.forms.set(kind, form_id);
                    Ok(())
                }
            }
        },
    )?;

    let progress = updated.ok_or_else(|| NotFound::TrainerProgress {
        trainer_id: trainer_id.to_string(),
    })?;
    info!(
        "linked form {} {} to trainer {} year '{}'",
        kind, form_id, trainer_id, year_label
    );
    Ok(progress)
}
