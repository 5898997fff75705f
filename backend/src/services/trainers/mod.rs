//! # Trainer Service Module
//!
//! Registration and editing of trainers under `/api/trainers`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /`**: every trainer, in registration order.
//! *   **`POST /`**: registers a trainer (`register::process`). Besides the
//!     trainer record this opens the trainer's progress with one empty year
//!     entry for the registration's `trainingYear`.
//! *   **`GET /{id}`**: one trainer.
//! *   **`PUT /{id}`**: replaces the trainer's details (`register::update`).

mod register;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;
use common::model::trainer::Trainer;

use crate::services::crud;

const API_PATH: &str = "/api/trainers";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(crud::list::<Trainer>))
        .route("", post().to(register::process))
        .route("/{id}", get().to(crud::get::<Trainer>))
        .route("/{id}", put().to(register::update))
}
