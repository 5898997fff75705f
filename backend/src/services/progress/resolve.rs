use actix_web::{web, HttpResponse};
use common::progress::{resolve_form, CancelToken, ResolveError};
use common::requests::YearQuery;
use log::debug;

use crate::error::ApiError;
use crate::services::progress::parse_kind;
use crate::store::Store;

pub async fn process(
    store: web::Data<Store>,
    path: web::Path<(String, String)>,
    query: web::Query<YearQuery>,
) -> Result<HttpResponse, ApiError> {
    let (trainer_id, form_type) = path.into_inner();
    let kind = parse_kind(&form_type)?;
    debug!(
        "resolving form {} for trainer {} (year {:?})",
        kind, trainer_id, query.year
    );

    let form = resolve_form(
        store.get_ref(),
        &trainer_id,
        kind,
        query.year.as_deref(),
        &CancelToken::new(),
    )
    .await
    .map_err(|e| match e {
        ResolveError::NotFound(not_found) => ApiError::Unresolved(not_found),
        ResolveError::Source(store_err) => ApiError::Store(store_err),
        ResolveError::Cancelled => ApiError::BadRequest("lookup cancelled".into()),
    })?;
    Ok(HttpResponse::Ok().json(form))
}
