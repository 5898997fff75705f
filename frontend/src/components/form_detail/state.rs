use common::model::form::FormDocument;
use common::progress::{CancelToken, NotFound};
use web_sys::AbortController;

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// No trainer is selected; nothing was requested.
    NoTrainer,
    Loading,
    Ready,
    Missing(NotFound),
    Failed(String),
}

pub struct FormDetail {
    pub status: Status,
    /// The loaded document, or a blank draft for a form not created yet.
    pub form: Option<FormDocument>,
    /// Aborts the fetches started by this view.
    pub abort: Option<AbortController>,
    /// Tells the resolver its result is no longer wanted.
    pub cancel: CancelToken,
    pub saving: bool,
    /// MD5 of the form as last loaded or saved.
    pub original_md5: Option<String>,
}

impl FormDetail {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            form: None,
            abort: None,
            cancel: CancelToken::new(),
            saving: false,
            original_md5: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match &self.form {
            Some(form) => crate::helpers::compute_md5(form) != self.original_md5,
            None => false,
        }
    }

    /// Cancels the lookup and aborts its requests.
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(controller) = self.abort.take() {
            controller.abort();
        }
    }
}
