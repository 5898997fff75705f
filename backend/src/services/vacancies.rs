//! Open training slots under `/api/vacancies`. Vacancies are created and
//! listed only.

use actix_web::web::{get, post, scope};
use actix_web::Scope;
use common::model::vacancy::Vacancy;

use crate::services::crud;

const API_PATH: &str = "/api/vacancies";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(crud::list::<Vacancy>))
        .route("", post().to(crud::create::<Vacancy>))
}
