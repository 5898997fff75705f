//! HTTP access to the backend.
//!
//! [`HttpSource`] plugs the REST endpoints into the shared resolver. Every
//! request it makes carries the abort signal of the view that started it, so
//! tearing the view down cancels the fetch in flight.

use common::model::form::FormDocument;
use common::model::form_kind::FormKind;
use common::model::progress::TrainerProgress;
use common::model::trainer::Trainer;
use common::progress::ProgressSource;
use common::requests::ApiMessage;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::AbortSignal;

#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("network error: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
}

fn segment(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

async fn failure(resp: Response) -> ApiFailure {
    let status = resp.status();
    let message = match resp.json::<ApiMessage>().await {
        Ok(body) => body.message,
        Err(_) => resp.status_text(),
    };
    ApiFailure::Status { status, message }
}

/// `Ok(None)` on 404, the decoded body on success.
async fn get_optional<T: DeserializeOwned>(
    url: &str,
    signal: Option<&AbortSignal>,
) -> Result<Option<T>, ApiFailure> {
    let resp = Request::get(url).abort_signal(signal).send().await?;
    if resp.status() == 404 {
        return Ok(None);
    }
    if !resp.ok() {
        return Err(failure(resp).await);
    }
    Ok(Some(resp.json::<T>().await?))
}

pub struct HttpSource {
    signal: Option<AbortSignal>,
}

impl HttpSource {
    pub fn new(signal: Option<AbortSignal>) -> Self {
        Self { signal }
    }

    pub async fn trainer(&self, trainer_id: &str) -> Result<Option<Trainer>, ApiFailure> {
        let url = format!("/api/trainers/{}", segment(trainer_id));
        get_optional(&url, self.signal.as_ref()).await
    }
}

impl ProgressSource for HttpSource {
    type Error = ApiFailure;

    async fn progress(&self, trainer_id: &str) -> Result<Option<TrainerProgress>, ApiFailure> {
        let url = format!("/api/trainerProgress/{}", segment(trainer_id));
        get_optional(&url, self.signal.as_ref()).await
    }

    async fn form(&self, kind: FormKind, id: &str) -> Result<Option<FormDocument>, ApiFailure> {
        let url = format!("{}/{}", kind.route(), segment(id));
        get_optional(&url, self.signal.as_ref()).await
    }
}

/// Creates (and links into the trainer's progress) or replaces a form.
pub async fn save_form(
    kind: FormKind,
    doc: &FormDocument,
    signal: Option<&AbortSignal>,
) -> Result<FormDocument, ApiFailure> {
    let request = match doc.id.as_deref() {
        Some(id) => Request::put(&format!("{}/{}", kind.route(), segment(id))),
        None => Request::post(&format!("{}?link=true", kind.route())),
    };
    let resp = request.abort_signal(signal).json(doc)?.send().await?;
    if !resp.ok() {
        return Err(failure(resp).await);
    }
    Ok(resp.json::<FormDocument>().await?)
}
