use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::not_blank;

/// Trainer details copied into a form when it is filled.
///
/// The snapshot is not kept in sync with the trainer record afterwards; a
/// form shows the trainer as they were at fill time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"))]
    pub parent_name: String,
    #[validate(custom(function = "not_blank"))]
    pub province: String,
    #[validate(custom(function = "not_blank"))]
    pub department: String,
    #[validate(custom(function = "not_blank"))]
    pub training_year: String,
}
