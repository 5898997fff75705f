use actix_web::{web, HttpResponse};
use common::model::form::FormDocument;
use common::model::form_kind::FormKind;
use common::requests::TrainerFilter;

use crate::error::ApiError;
use crate::store::Store;

pub async fn process(
    store: web::Data<Store>,
    kind: web::Data<FormKind>,
    filter: web::Query<TrainerFilter>,
) -> Result<HttpResponse, ApiError> {
    let docs: Vec<FormDocument> = store.list(kind.collection(), filter.trainer.as_deref())?;
    Ok(HttpResponse::Ok().json(docs))
}

#[cfg(test)]
mod tests {
    use crate::services::forms::fixtures;
    use crate::services::test_support::{self, test_app};
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn trainer_filter_limits_the_list() {
        let store = test_support::store();
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(store, test_support::upload_root(dir.path()));

        for trainer in ["t1", "t2", "t1"] {
            let req = test::TestRequest::post()
                .uri("/api/evaluationFormK")
                .set_json(fixtures::form(trainer, json!([])))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/evaluationFormK?trainer=t1")
            .to_request();
        let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mine.len(), 2);

        let req = test::TestRequest::get()
            .uri("/api/evaluationFormK")
            .to_request();
        let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 3);
    }
}
