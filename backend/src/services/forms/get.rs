use actix_web::{web, HttpResponse};
use common::model::form::FormDocument;
use common::model::form_kind::FormKind;

use crate::error::ApiError;
use crate::store::Store;

pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<FormKind>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let doc = load(&store, **kind, &id)?;
    Ok(HttpResponse::Ok().json(doc))
}

fn load(store: &Store, kind: FormKind, id: &str) -> Result<FormDocument, ApiError> {
    store
        .get(kind.collection(), id)?
        .ok_or_else(|| ApiError::not_found(kind.title(), id))
}
