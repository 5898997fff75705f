//! Shared handlers of the per-trainer logs that carry file attachments
//! (actions and rewards/punishments).
//!
//! Entries are created from a multipart upload, listed, deleted together
//! with their files, and their files downloaded by stored name. Entries are
//! never edited.

use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::action::{
    NewRewardPunishment, NewTrainerAction, TrainerAction, TrainerRewardPunishment,
};
use common::model::attachment::Attachment;
use common::requests::{ApiMessage, TrainerFilter};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::error::ApiError;
use crate::services::attachments::{self, UploadRoot};
use crate::services::new_id;
use crate::store::{collections, Store};

pub trait LogEntry: Serialize + DeserializeOwned + 'static {
    /// The `json` part of the upload.
    type Input: DeserializeOwned + Validate;

    const COLLECTION: &'static str;
    const UPLOAD_DIR: &'static str;
    const NAME: &'static str;

    fn build(id: String, input: Self::Input, files: Vec<Attachment>, created_at: String) -> Self;

    fn trainer(&self) -> &str;

    fn files(&self) -> &[Attachment];
}

impl LogEntry for TrainerAction {
    type Input = NewTrainerAction;

    const COLLECTION: &'static str = collections::TRAINER_ACTIONS;
    const UPLOAD_DIR: &'static str = attachments::ACTIONS_DIR;
    const NAME: &'static str = "trainer action";

    fn build(id: String, input: NewTrainerAction, files: Vec<Attachment>, created_at: String) -> Self {
        TrainerAction {
            id,
            trainer: input.trainer,
            description: input.description,
            date: input.date,
            created_at,
            files,
        }
    }

    fn trainer(&self) -> &str {
        &self.trainer
    }

    fn files(&self) -> &[Attachment] {
        &self.files
    }
}

impl LogEntry for TrainerRewardPunishment {
    type Input = NewRewardPunishment;

    const COLLECTION: &'static str = collections::TRAINER_REWARD_PUNISHMENT;
    const UPLOAD_DIR: &'static str = attachments::REWARD_PUNISHMENT_DIR;
    const NAME: &'static str = "reward/punishment";

    fn build(
        id: String,
        input: NewRewardPunishment,
        files: Vec<Attachment>,
        created_at: String,
    ) -> Self {
        TrainerRewardPunishment {
            id,
            trainer: input.trainer,
            kind: input.kind,
            description: input.description,
            date: input.date,
            created_at,
            files,
        }
    }

    fn trainer(&self) -> &str {
        &self.trainer
    }

    fn files(&self) -> &[Attachment] {
        &self.files
    }
}

pub async fn list<T: LogEntry>(
    store: web::Data<Store>,
    filter: web::Query<TrainerFilter>,
) -> Result<HttpResponse, ApiError> {
    let entries: Vec<T> = store.list(T::COLLECTION, filter.trainer.as_deref())?;
    Ok(HttpResponse::Ok().json(entries))
}

pub async fn create<T: LogEntry>(
    store: web::Data<Store>,
    root: web::Data<UploadRoot>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let dir = root.dir(T::UPLOAD_DIR);
    let upload = attachments::receive::<T::Input>(payload, &dir).await?;
    let id = new_id();
    let entry = T::build(id.clone(), upload.meta, upload.files, Utc::now().to_rfc3339());

    if let Err(e) = store.insert(T::COLLECTION, &id, Some(entry.trainer()), &entry) {
        attachments::remove_files(&dir, entry.files()).await;
        return Err(e.into());
    }
    info!(
        "created {} {} for trainer {} with {} file(s)",
        T::NAME,
        id,
        entry.trainer(),
        entry.files().len()
    );
    Ok(HttpResponse::Created().json(entry))
}

/// Removes the entry's files first, then the entry.
pub async fn delete<T: LogEntry>(
    store: web::Data<Store>,
    root: web::Data<UploadRoot>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let entry: T = store
        .get(T::COLLECTION, &id)?
        .ok_or_else(|| ApiError::not_found(T::NAME, &id))?;
    attachments::remove_files(&root.dir(T::UPLOAD_DIR), entry.files()).await;
    store.delete(T::COLLECTION, &id)?;
    info!("deleted {} {}", T::NAME, id);
    Ok(HttpResponse::Ok().json(ApiMessage {
        message: format!("{} deleted", T::NAME),
        reason: None,
    }))
}

pub async fn download<T: LogEntry>(
    root: web::Data<UploadRoot>,
    filename: web::Path<String>,
) -> Result<NamedFile, ApiError> {
    attachments::open_download(&root.dir(T::UPLOAD_DIR), &filename).await
}
