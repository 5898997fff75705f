//! Trainer + year → form document resolution.
//!
//! Every form detail view needs the same walk: load the trainer's progress,
//! pick the year (the selected one, else the current one), read the form
//! type's slot in that year, then load the document the slot points at. This
//! module does that walk once for all form types, against any
//! [`ProgressSource`].

mod cancel;
mod resolver;

pub use cancel::CancelToken;
pub use resolver::{
    NotFound, ProgressSource, ResolveError, locate_form_id, resolve_form, resolve_form_id,
    target_year,
};
