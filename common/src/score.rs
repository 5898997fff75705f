//! Score table arithmetic.
//!
//! Averages only look at rows that were actually graded; an empty row is
//! left out of both the sum and the count rather than counted as zero.

use thiserror::Error;

use crate::model::form::{EvaluationRow, FormDocument};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("score '{value}' is not a number")]
    NotNumeric { value: String },
}

fn parse(value: &str) -> Result<f64, ScoreError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScoreError::NotNumeric {
            value: value.to_string(),
        })
}

/// Sum of the filled sub-scores. Blank entries are skipped.
pub fn row_total(sub_scores: &[String]) -> Result<f64, ScoreError> {
    sub_scores
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse(s))
        .sum()
}

/// The value a row contributes to the average, or `None` for an ungraded row.
///
/// A typed score wins; a sub-scored row without one contributes its total.
pub fn row_score(row: &EvaluationRow) -> Result<Option<f64>, ScoreError> {
    if !row.is_scored() {
        return Ok(None);
    }
    if !row.score.trim().is_empty() {
        return parse(&row.score).map(Some);
    }
    row_total(&row.sub_scores).map(Some)
}

/// Mean over graded rows; `None` when no row is graded.
pub fn average(rows: &[EvaluationRow]) -> Result<Option<f64>, ScoreError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in rows {
        if let Some(value) = row_score(row)? {
            sum += value;
            count += 1;
        }
    }
    Ok((count > 0).then(|| sum / count as f64))
}

/// Recomputes the stored average and per-row totals of a document.
pub fn snapshot(doc: &mut FormDocument) -> Result<(), ScoreError> {
    for row in &mut doc.rows {
        row.total = if row.sub_scores.iter().any(|s| !s.trim().is_empty()) {
            Some(row_total(&row.sub_scores)?)
        } else {
            None
        };
    }
    doc.average = average(&doc.rows)?;
    Ok(())
}
