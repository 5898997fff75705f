//! The fixed set of evaluation-form categories.
//!
//! Each form type owns one storage collection, one REST base path and one slot
//! in a progress year entry (`forms.formC`, `forms.formD`, ...). `FormKind` is
//! the single tag every layer keys on, so adding a form type means adding one
//! variant here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sub-scores on the rows of a sub-scored form.
pub const SUB_SCORES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormKind {
    C,
    D,
    E,
    G,
    H,
    I,
    J,
    K,
    /// Rotation form.
    R,
    /// Checklist form.
    F,
}

impl FormKind {
    pub const ALL: [FormKind; 10] = [
        FormKind::C,
        FormKind::D,
        FormKind::E,
        FormKind::G,
        FormKind::H,
        FormKind::I,
        FormKind::J,
        FormKind::K,
        FormKind::R,
        FormKind::F,
    ];

    pub fn letter(self) -> char {
        match self {
            FormKind::C => 'C',
            FormKind::D => 'D',
            FormKind::E => 'E',
            FormKind::G => 'G',
            FormKind::H => 'H',
            FormKind::I => 'I',
            FormKind::J => 'J',
            FormKind::K => 'K',
            FormKind::R => 'R',
            FormKind::F => 'F',
        }
    }

    /// Name of the slot inside a year entry's `forms` object.
    pub fn links_field(self) -> &'static str {
        match self {
            FormKind::C => "formC",
            FormKind::D => "formD",
            FormKind::E => "formE",
            FormKind::G => "formG",
            FormKind::H => "formH",
            FormKind::I => "formI",
            FormKind::J => "formJ",
            FormKind::K => "formK",
            FormKind::R => "formR",
            FormKind::F => "formF",
        }
    }

    /// Storage collection holding the documents of this form type.
    pub fn collection(self) -> &'static str {
        match self {
            FormKind::C => "evaluationFormC",
            FormKind::D => "evaluationFormD",
            FormKind::E => "evaluationFormE",
            FormKind::G => "evaluationFormG",
            FormKind::H => "evaluationFormH",
            FormKind::I => "evaluationFormI",
            FormKind::J => "evaluationFormJ",
            FormKind::K => "evaluationFormK",
            FormKind::R => "rotationFormR",
            FormKind::F => "checklists",
        }
    }

    /// Number of numeric sub-scores each row of this form carries. Rows of
    /// the other forms take a single score.
    pub fn sub_score_count(self) -> usize {
        match self {
            FormKind::G | FormKind::R => SUB_SCORES,
            _ => 0,
        }
    }

    /// REST base path of the form's CRUD endpoints.
    pub fn route(self) -> &'static str {
        match self {
            FormKind::C => "/api/evaluationFormC",
            FormKind::D => "/api/evaluationFormD",
            FormKind::E => "/api/evaluationFormE",
            FormKind::G => "/api/evaluationFormG",
            FormKind::H => "/api/evaluationFormH",
            FormKind::I => "/api/evaluationFormI",
            FormKind::J => "/api/evaluationFormJ",
            FormKind::K => "/api/evaluationFormK",
            FormKind::R => "/api/rotation-form-r",
            FormKind::F => "/api/checklists",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormKind::R => "Rotation form",
            FormKind::F => "Checklist",
            FormKind::C => "Evaluation form C",
            FormKind::D => "Evaluation form D",
            FormKind::E => "Evaluation form E",
            FormKind::G => "Evaluation form G",
            FormKind::H => "Evaluation form H",
            FormKind::I => "Evaluation form I",
            FormKind::J => "Evaluation form J",
            FormKind::K => "Evaluation form K",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form type '{0}'")]
pub struct UnknownFormKind(pub String);

impl FromStr for FormKind {
    type Err = UnknownFormKind;

    /// Accepts the bare letter (`"h"`, `"H"`), the slot name (`"formH"`) or
    /// the long names of the two non-lettered forms.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "rotation" => return Ok(FormKind::R),
            "checklist" => return Ok(FormKind::F),
            _ => {}
        }
        let letter = trimmed.strip_prefix("form").unwrap_or(trimmed);
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => FormKind::ALL
                .into_iter()
                .find(|kind| kind.letter() == c.to_ascii_uppercase())
                .ok_or_else(|| UnknownFormKind(tag.to_string())),
            _ => Err(UnknownFormKind(tag.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_slots_and_names() {
        assert_eq!("h".parse::<FormKind>(), Ok(FormKind::H));
        assert_eq!("formE".parse::<FormKind>(), Ok(FormKind::E));
        assert_eq!("Rotation".parse::<FormKind>(), Ok(FormKind::R));
        assert_eq!("checklist".parse::<FormKind>(), Ok(FormKind::F));
    }

    #[test]
    fn rejects_letters_outside_the_set() {
        assert!("A".parse::<FormKind>().is_err());
        assert!("B".parse::<FormKind>().is_err());
        assert!("formCD".parse::<FormKind>().is_err());
        assert!("".parse::<FormKind>().is_err());
    }

    #[test]
    fn routes_and_collections_are_unique() {
        let mut routes: Vec<_> = FormKind::ALL.iter().map(|k| k.route()).collect();
        let mut collections: Vec<_> = FormKind::ALL.iter().map(|k| k.collection()).collect();
        routes.sort();
        routes.dedup();
        collections.sort();
        collections.dedup();
        assert_eq!(routes.len(), FormKind::ALL.len());
        assert_eq!(collections.len(), FormKind::ALL.len());
    }

    #[test]
    fn only_rotation_and_g_rows_are_sub_scored() {
        assert_eq!(FormKind::R.sub_score_count(), SUB_SCORES);
        assert_eq!(FormKind::G.sub_score_count(), SUB_SCORES);
        assert_eq!(FormKind::H.sub_score_count(), 0);
    }
}
