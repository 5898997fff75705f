//! Teacher records under `/api/teachers`: list, register, fetch, replace.

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;
use common::model::teacher::Teacher;

use crate::services::crud;

const API_PATH: &str = "/api/teachers";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(crud::list::<Teacher>))
        .route("", post().to(crud::create::<Teacher>))
        .route("/{id}", get().to(crud::get::<Teacher>))
        .route("/{id}", put().to(crud::update::<Teacher>))
}
