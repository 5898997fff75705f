//! Per-trainer training history.
//!
//! A `TrainerProgress` lists the trainer's training years in order. Each year
//! entry has one slot per form type pointing at the form document filled for
//! that year. An empty slot is the normal "not created yet" state.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::form_kind::FormKind;
use crate::validation::not_blank;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "consistent_years"))]
pub struct TrainerProgress {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub trainer: String,
    #[validate(custom(function = "not_blank"))]
    pub current_training_year: String,
    #[serde(default)]
    pub training_history: Vec<YearEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearEntry {
    pub year_label: String,
    #[serde(default)]
    pub academic_year: String,
    #[serde(default)]
    pub forms: FormLinks,
}

/// Form document ids of one training year, one slot per form type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLinks {
    #[serde(rename = "formC", default)]
    pub form_c: Option<String>,
    #[serde(rename = "formD", default)]
    pub form_d: Option<String>,
    #[serde(rename = "formE", default)]
    pub form_e: Option<String>,
    #[serde(rename = "formG", default)]
    pub form_g: Option<String>,
    #[serde(rename = "formH", default)]
    pub form_h: Option<String>,
    #[serde(rename = "formI", default)]
    pub form_i: Option<String>,
    #[serde(rename = "formJ", default)]
    pub form_j: Option<String>,
    #[serde(rename = "formK", default)]
    pub form_k: Option<String>,
    #[serde(rename = "formR", default)]
    pub form_r: Option<String>,
    #[serde(rename = "formF", default)]
    pub form_f: Option<String>,
}

impl FormLinks {
    fn slot(&self, kind: FormKind) -> &Option<String> {
        match kind {
            FormKind::C => &self.form_c,
            FormKind::D => &self.form_d,
            FormKind::E => &self.form_e,
            FormKind::G => &self.form_g,
            FormKind::H => &self.form_h,
            FormKind::I => &self.form_i,
            FormKind::J => &self.form_j,
            FormKind::K => &self.form_k,
            FormKind::R => &self.form_r,
            FormKind::F => &self.form_f,
        }
    }

    fn slot_mut(&mut self, kind: FormKind) -> &mut Option<String> {
        match kind {
            FormKind::C => &mut self.form_c,
            FormKind::D => &mut self.form_d,
            FormKind::E => &mut self.form_e,
            FormKind::G => &mut self.form_g,
            FormKind::H => &mut self.form_h,
            FormKind::I => &mut self.form_i,
            FormKind::J => &mut self.form_j,
            FormKind::K => &mut self.form_k,
            FormKind::R => &mut self.form_r,
            FormKind::F => &mut self.form_f,
        }
    }

    /// The linked document id; a blank id counts as unlinked.
    pub fn get(&self, kind: FormKind) -> Option<&str> {
        self.slot(kind)
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// Stores `id` in the slot and returns what was there before.
    pub fn set(&mut self, kind: FormKind, id: impl Into<String>) -> Option<String> {
        self.slot_mut(kind).replace(id.into())
    }

    pub fn clear(&mut self, kind: FormKind) -> Option<String> {
        self.slot_mut(kind).take()
    }
}

impl TrainerProgress {
    /// Progress for a newly registered trainer: one empty entry for the
    /// year they registered in, which is also the current year.
    pub fn starting(trainer: impl Into<String>, year_label: impl Into<String>) -> Self {
        let year_label = year_label.into();
        Self {
            trainer: trainer.into(),
            current_training_year: year_label.clone(),
            training_history: vec![YearEntry {
                year_label,
                academic_year: String::new(),
                forms: FormLinks::default(),
            }],
        }
    }

    /// Exact-label lookup; no trimming and no fallback to other years.
    pub fn year(&self, label: &str) -> Option<&YearEntry> {
        self.training_history.iter().find(|e| e.year_label == label)
    }

    pub fn year_mut(&mut self, label: &str) -> Option<&mut YearEntry> {
        self.training_history
            .iter_mut()
            .find(|e| e.year_label == label)
    }
}

/// Year labels are unique and the current year is one of them.
fn consistent_years(progress: &TrainerProgress) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for entry in &progress.training_history {
        if !seen.insert(entry.year_label.as_str()) {
            let mut err = ValidationError::new("duplicate_year");
            err.message = Some(format!("year '{}' appears more than once", entry.year_label).into());
            return Err(err);
        }
    }
    if !seen.contains(progress.current_training_year.as_str()) {
        let mut err = ValidationError::new("unknown_current_year");
        err.message = Some(
            format!(
                "current year '{}' has no entry in the training history",
                progress.current_training_year
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn blank_slot_counts_as_unlinked() {
        let mut links = FormLinks::default();
        links.set(FormKind::E, "  ");
        assert_eq!(links.get(FormKind::E), None);
        links.set(FormKind::E, "doc-1");
        assert_eq!(links.get(FormKind::E), Some("doc-1"));
        assert_eq!(links.get(FormKind::H), None);
    }

    #[test]
    fn null_slots_deserialize_as_empty() {
        let links: FormLinks =
            serde_json::from_str(r#"{ "formC": "abc", "formE": null }"#).unwrap();
        assert_eq!(links.get(FormKind::C), Some("abc"));
        assert_eq!(links.get(FormKind::E), None);
        assert_eq!(links.get(FormKind::F), None);
    }

    #[test]
    fn duplicate_year_labels_fail_validation() {
        let mut progress = TrainerProgress::starting("t1", "سال اول");
        progress.training_history.push(YearEntry {
            year_label: "سال اول".into(),
            ..YearEntry::default()
        });
        assert!(progress.validate().is_err());
    }

    #[test]
    fn current_year_must_be_in_the_history() {
        let mut progress = TrainerProgress::starting("t1", "سال اول");
        assert!(progress.validate().is_ok());
        progress.current_training_year = "سال سوم".into();
        assert!(progress.validate().is_err());
    }

    #[test]
    fn year_lookup_is_exact() {
        let progress = TrainerProgress::starting("t1", "سال اول");
        assert!(progress.year("سال اول").is_some());
        assert!(progress.year(" سال اول").is_none());
    }
}
