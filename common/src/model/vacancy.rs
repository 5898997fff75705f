use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

/// An open training slot. Not tied to any trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(range(min = 1, message = "count must be at least 1"))]
    pub count: u32,
    #[validate(custom(function = "not_blank"))]
    pub date: String,
}
