//! HTTP API. Each sub-module owns one resource and exposes a
//! `configure_routes()` returning its actix `Scope`.

pub mod attachments;
mod crud;
mod event_log;
pub mod forms;
pub mod lectures;
pub mod progress;
pub mod records;
pub mod reward_punishment;
pub mod teachers;
pub mod trainer_actions;
pub mod trainers;
pub mod users;
pub mod vacancies;

use actix_web::web;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

/// Registers every API scope plus the JSON body limit and error shape.
pub fn configure(cfg: &mut web::ServiceConfig, json_limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .service(trainers::configure_routes())
    .service(teachers::configure_routes())
    .service(progress::configure_routes())
    .service(users::configure_routes())
    .service(vacancies::configure_routes())
    .service(lectures::configure_routes())
    .service(trainer_actions::configure_routes())
    .service(reward_punishment::configure_routes());

    for scope in forms::configure_routes() {
        cfg.service(scope);
    }
    for scope in records::configure_routes() {
        cfg.service(scope);
    }
}

/// Runs the shared validation rules; nothing is stored when they fail.
pub(crate) fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    payload.validate()?;
    Ok(payload)
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
