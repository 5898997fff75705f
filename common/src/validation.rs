//! Request validation shared by the client (before submit) and the server
//! (before storing).
//!
//! Field rules are declared with `validator` derives on the models; the
//! functions here are the custom checks those derives point at.

use std::borrow::Cow;

use validator::{ValidateEmail, ValidationError};

use crate::model::form::EvaluationRow;
use crate::score;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be empty")));
    }
    Ok(())
}

/// Empty is allowed; anything else must be an email address.
pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.validate_email() {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message(Cow::from("not a valid email address")))
}

/// Every row is either fully filled or fully empty, and every filled score
/// is a number.
pub fn rows_complete_or_empty(rows: &[EvaluationRow]) -> Result<(), ValidationError> {
    for (index, row) in rows.iter().enumerate() {
        if row.is_blank() {
            continue;
        }
        if !row.is_complete() {
            let mut err = ValidationError::new("row_incomplete")
                .with_message(Cow::from("row must be fully filled or left empty"));
            err.add_param(Cow::from("row"), &(index + 1));
            return Err(err);
        }
        if let Err(e) = score::row_score(row) {
            let mut err =
                ValidationError::new("score_not_numeric").with_message(Cow::from(e.to_string()));
            err.add_param(Cow::from("row"), &(index + 1));
            return Err(err);
        }
    }
    Ok(())
}
