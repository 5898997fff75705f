use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::personal_info::PersonalInfo;
use crate::validation::{not_blank, optional_email};

/// A resident followed through the multi-year programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub department: String,
    /// Year label the trainer is currently in, e.g. "سال اول".
    #[validate(custom(function = "not_blank"))]
    pub training_year: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    #[validate(custom(function = "optional_email"))]
    pub email: String,
    /// Base64 image payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Trainer {
    /// Snapshot copied into a form at fill time.
    pub fn personal_info(&self) -> PersonalInfo {
        PersonalInfo {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            parent_name: self.parent_name.clone(),
            province: self.province.clone(),
            department: self.department.clone(),
            training_year: self.training_year.clone(),
        }
    }
}
