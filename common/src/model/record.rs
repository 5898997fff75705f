//! Loosely shaped records (conference, monograph, monograph evaluation,
//! teacher activities). Stored as submitted; the only requirement is an
//! owner reference.

use serde_json::{Map, Value};
use validator::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Conference,
    Monograph,
    MonographEvaluation,
    TeacherActivities,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Conference,
        RecordKind::Monograph,
        RecordKind::MonographEvaluation,
        RecordKind::TeacherActivities,
    ];

    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Conference => "conference",
            RecordKind::Monograph => "monograph",
            RecordKind::MonographEvaluation => "monographEvaluation",
            RecordKind::TeacherActivities => "teacher-activities",
        }
    }

    pub fn route(self) -> String {
        format!("/api/{}", self.collection())
    }
}

/// Owner of a record: its `trainer` or, failing that, its `teacher`.
pub fn owner(body: &Map<String, Value>) -> Result<&str, ValidationError> {
    ["trainer", "teacher"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            let mut err = ValidationError::new("owner_required");
            err.message = Some("record needs a trainer or teacher reference".into());
            err
        })
}
