use actix_web::{web, HttpResponse};
use common::model::progress::{FormLinks, TrainerProgress, YearEntry};
use common::requests::NewYearRequest;
use log::info;

use crate::error::ApiError;
use crate::services::validated;
use crate::store::{collections, Store};

pub async fn get(
    store: web::Data<Store>,
    trainer_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let progress = load(&store, &trainer_id)?;
    Ok(HttpResponse::Ok().json(progress))
}

/// Creates or replaces the whole record. The trainer in the body, if any,
/// has to match the path.
pub async fn put(
    store: web::Data<Store>,
    trainer_id: web::Path<String>,
    payload: web::Json<TrainerProgress>,
) -> Result<HttpResponse, ApiError> {
    let trainer_id = trainer_id.into_inner();
    let mut progress = payload.into_inner();
    if progress.trainer.trim().is_empty() {
        progress.trainer = trainer_id.clone();
    } else if progress.trainer != trainer_id {
        return Err(ApiError::BadRequest(
            "trainer in body does not match the path".into(),
        ));
    }
    let progress = validated(progress)?;
    store.upsert(
        collections::TRAINER_PROGRESS,
        &trainer_id,
        Some(&trainer_id),
        &progress,
    )?;
    Ok(HttpResponse::Ok().json(progress))
}

pub async fn open_year(
    store: web::Data<Store>,
    trainer_id: web::Path<String>,
    payload: web::Json<NewYearRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(payload.into_inner())?;
    let progress = open_year_in(&store, &trainer_id, request)?;
    Ok(HttpResponse::Created().json(progress))
}

pub(crate) fn load(store: &Store, trainer_id: &str) -> Result<TrainerProgress, ApiError> {
    store
        .get(collections::TRAINER_PROGRESS, trainer_id)?
        .ok_or_else(|| ApiError::not_found("training progress for trainer", trainer_id))
}

fn open_year_in(
    store: &Store,
    trainer_id: &str,
    request: NewYearRequest,
) -> Result<TrainerProgress, ApiError> {
    let updated = store.modify(
        collections::TRAINER_PROGRESS,
        trainer_id,
        |progress: &mut TrainerProgress| {
            if progress.year(&request.year_label).is_some() {
                return Err(ApiError::Conflict(format!(
                    "year '{}' already exists",
                    request.year_label
                )));
            }
            progress.training_history.push(YearEntry {
                year_label: request.year_label.clone(),
                academic_year: request.academic_year.clone(),
                forms: FormLinks::default(),
            });
            progress.current_training_year = request.year_label.clone();
            Ok(())
        },
    )?;
    let progress = updated
        .ok_or_else(|| ApiError::not_found("training progress for trainer", trainer_id))?;
    info!(
        "trainer {} moved to year '{}'",
        trainer_id, progress.current_training_year
    );
    Ok(progress)
}
