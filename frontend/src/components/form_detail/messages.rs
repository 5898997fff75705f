use common::model::form::{EvaluationRow, FormDocument};
use common::progress::NotFound;

pub enum Msg {
    /// The resolver found the document.
    Loaded(FormDocument),
    /// The lookup stopped at a known step. `draft` is a blank form to fill
    /// in when the step was "not created yet".
    Missing(NotFound, Option<FormDocument>),
    Failed(String),
    RowsChanged(Vec<EvaluationRow>),
    Save,
    Saved(FormDocument),
    SaveFailed(String),
}
