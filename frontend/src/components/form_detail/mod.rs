//! Detail view of one evaluation form, for any form type.
//!
//! On creation it reads the selected trainer from [`TrainerContext`] and, if
//! there is none, stops right there without touching the network. Otherwise
//! it runs the shared resolver against [`HttpSource`]. The view owns an
//! `AbortController` for the fetches and a `CancelToken` for the resolver;
//! both fire in `destroy`, so a view that is gone never applies a late
//! result.
//!
//! A form that was not created yet for the year opens as a blank draft
//! carrying the trainer's personal info; saving it creates the document and
//! links it into the year.

use common::model::form::{EvaluationRow, FormDocument};
use common::model::form_kind::FormKind;
use common::progress::{resolve_form, CancelToken, NotFound, ResolveError};
use web_sys::AbortController;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

use crate::api::HttpSource;
use crate::helpers::show_toast;
use crate::session::TrainerContext;
pub use messages::Msg;
pub use props::FormDetailProps;
pub use state::FormDetail;
use state::Status;

/// Blank rows offered in a new draft.
const DRAFT_ROWS: usize = 5;

impl Component for FormDetail {
    type Message = Msg;
    type Properties = FormDetailProps;

    fn create(ctx: &Context<Self>) -> Self {
        let trainer_id = ctx
            .link()
            .context::<TrainerContext>(Callback::noop())
            .and_then(|(context, _)| context.trainer_id);

        let Some(trainer_id) = trainer_id else {
            show_toast("Select a trainer first.");
            return FormDetail::new(Status::NoTrainer);
        };

        let mut component = FormDetail::new(Status::Loading);
        component.abort = AbortController::new().ok();
        let signal = component.abort.as_ref().map(|c| c.signal());
        start_lookup(
            ctx,
            HttpSource::new(signal),
            trainer_id.to_string(),
            component.cancel.clone(),
        );
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.stop();
    }
}

fn start_lookup(
    ctx: &Context<FormDetail>,
    source: HttpSource,
    trainer_id: String,
    cancel: CancelToken,
) {
    let link = ctx.link().clone();
    let kind = ctx.props().kind;
    let year = ctx.props().year.as_ref().map(|y| y.to_string());

    spawn_local(async move {
        let result = resolve_form(&source, &trainer_id, kind, year.as_deref(), &cancel).await;
        if cancel.is_cancelled() {
            return;
        }
        match result {
            Ok(form) => link.send_message(Msg::Loaded(form)),
            Err(ResolveError::Cancelled) => {}
            Err(ResolveError::NotFound(not_found)) => {
                let draft = match &not_found {
                    NotFound::FormNotCreated { year, .. } => {
                        blank_draft(&source, &trainer_id, kind, year).await
                    }
                    _ => None,
                };
                if !cancel.is_cancelled() {
                    link.send_message(Msg::Missing(not_found, draft));
                }
            }
            Err(ResolveError::Source(e)) => link.send_message(Msg::Failed(e.to_string())),
        }
    });
}

async fn blank_draft(
    source: &HttpSource,
    trainer_id: &str,
    kind: FormKind,
    year: &str,
) -> Option<FormDocument> {
    let trainer = match source.trainer(trainer_id).await {
        Ok(trainer) => trainer?,
        Err(e) => {
            gloo_console::warn!(format!("no draft for form {}: {}", kind, e));
            return None;
        }
    };
    Some(FormDocument {
        id: None,
        trainer: trainer_id.to_string(),
        year_label: year.to_string(),
        personal_info: trainer.personal_info(),
        rows: vec![EvaluationRow::with_sub_scores(kind.sub_score_count()); DRAFT_ROWS],
        ..FormDocument::default()
    })
}
