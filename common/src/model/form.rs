//! Evaluation form documents.
//!
//! All form types share one envelope (owner, year, personal-info snapshot and
//! a score table). Whatever else a particular form carries is kept in
//! `extra` and written back untouched, so a document read after a submit is
//! field-for-field what the client sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::model::personal_info::PersonalInfo;
use crate::validation::{not_blank, rows_complete_or_empty};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub trainer: String,
    #[validate(custom(function = "not_blank"))]
    pub year_label: String,
    #[validate(nested)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    #[validate(custom(function = "rows_complete_or_empty"))]
    pub rows: Vec<EvaluationRow>,
    /// Average of the filled rows at submit time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One line of a form's score table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRow {
    #[serde(default)]
    pub label: String,
    /// Kept as typed by the grader; parsed only when averaging.
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub grader: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_scores: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EvaluationRow {
    /// A blank row with `count` empty sub-score cells.
    pub fn with_sub_scores(count: usize) -> Self {
        Self {
            sub_scores: vec![String::new(); count],
            ..Self::default()
        }
    }

    /// A row counts toward the average only with both a score and a grader.
    /// On sub-scored rows the filled sub-scores stand in for the score.
    pub fn is_scored(&self) -> bool {
        if self.grader.trim().is_empty() {
            return false;
        }
        !self.score.trim().is_empty() || self.sub_scores_filled()
    }

    /// True when none of the fields a grader fills in carry a value.
    pub fn is_blank(&self) -> bool {
        self.score.trim().is_empty()
            && self.grader.trim().is_empty()
            && self.sub_scores.iter().all(|s| s.trim().is_empty())
    }

    /// True when every field a grader fills in carries a value.
    pub fn is_complete(&self) -> bool {
        let subs_ok = self.sub_scores.is_empty() || self.sub_scores_filled();
        self.is_scored() && subs_ok
    }

    fn sub_scores_filled(&self) -> bool {
        !self.sub_scores.is_empty() && self.sub_scores.iter().all(|s| !s.trim().is_empty())
    }
}
