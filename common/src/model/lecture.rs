use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::attachment::Attachment;
use crate::validation::not_blank;

/// A scheduled teaching session given by a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    #[serde(rename = "_id")]
    pub id: String,
    pub teacher: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub files: Vec<Attachment>,
}

/// Editable lecture fields, sent as the `json` part on create and as the
/// body on update.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LectureInput {
    #[validate(custom(function = "not_blank"))]
    pub teacher: String,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

impl Lecture {
    pub fn apply(&mut self, input: LectureInput) {
        self.teacher = input.teacher;
        self.title = input.title;
        self.date = input.date;
        self.location = input.location;
        self.description = input.description;
    }
}
