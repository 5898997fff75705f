//! Per-trainer event logs with attached files: general actions and
//! rewards/punishments. Records are appended and may be deleted by an admin,
//! never edited.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::attachment::Attachment;
use crate::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerAction {
    #[serde(rename = "_id")]
    pub id: String,
    pub trainer: String,
    pub description: String,
    #[serde(default)]
    pub date: String,
    /// RFC 3339 timestamp set by the server.
    pub created_at: String,
    #[serde(default)]
    pub files: Vec<Attachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardPunishmentKind {
    Reward,
    Punishment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerRewardPunishment {
    #[serde(rename = "_id")]
    pub id: String,
    pub trainer: String,
    pub kind: RewardPunishmentKind,
    pub description: String,
    #[serde(default)]
    pub date: String,
    pub created_at: String,
    #[serde(default)]
    pub files: Vec<Attachment>,
}

/// The `json` part of an action upload.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTrainerAction {
    #[validate(custom(function = "not_blank"))]
    pub trainer: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[serde(default)]
    pub date: String,
}

/// The `json` part of a reward/punishment upload.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRewardPunishment {
    #[validate(custom(function = "not_blank"))]
    pub trainer: String,
    pub kind: RewardPunishmentKind,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[serde(default)]
    pub date: String,
}
