use actix_web::{web, HttpResponse};
use common::model::form::FormDocument;
use common::model::form_kind::FormKind;
use common::requests::CreateFormQuery;
use log::{info, warn};

use super::prepare;
use crate::error::ApiError;
use crate::services::new_id;
use crate::services::progress::link::link_form;
use crate::store::Store;

pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<FormKind>,
    query: web::Query<CreateFormQuery>,
    payload: web::Json<FormDocument>,
) -> Result<HttpResponse, ApiError> {
    let doc = create_form(&store, **kind, payload.into_inner(), query.link)?;
    Ok(HttpResponse::Created().json(doc))
}

/// Stores a new form document. When `link` is set and the progress update
/// fails, the stored document is deleted again before the error is returned.
pub fn create_form(
    store: &Store,
    kind: FormKind,
    doc: FormDocument,
    link: bool,
) -> Result<FormDocument, ApiError> {
    let mut doc = prepare(doc)?;
    let id = new_id();
    doc.id = Some(id.clone());
    store.insert(kind.collection(), &id, Some(&doc.trainer), &doc)?;
    info!("created form {} {} for trainer {}", kind, id, doc.trainer);

    if link {
        if let Err(e) = link_form(store, &doc.trainer, &doc.year_label, kind, &id) {
            warn!("linking form {} {} failed, removing it: {}", kind, id, e);
            store.delete(kind.collection(), &id)?;
            return Err(e);
        }
    }
    Ok(doc)
}
