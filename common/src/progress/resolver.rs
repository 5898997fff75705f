use thiserror::Error;

use crate::model::form::FormDocument;
use crate::model::form_kind::FormKind;
use crate::model::progress::TrainerProgress;
use crate::progress::cancel::CancelToken;

/// Where progress records and form documents are read from.
///
/// `Ok(None)` means the record does not exist; `Err` is reserved for the
/// source itself failing (network, database).
#[allow(async_fn_in_trait)]
pub trait ProgressSource {
    type Error;

    async fn progress(&self, trainer_id: &str) -> Result<Option<TrainerProgress>, Self::Error>;

    async fn form(&self, kind: FormKind, id: &str) -> Result<Option<FormDocument>, Self::Error>;
}

/// The step at which resolution came up empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("no training progress recorded for trainer {trainer_id}")]
    TrainerProgress { trainer_id: String },
    #[error("training year '{year}' not found in the trainer's history")]
    YearEntry { year: String },
    #[error("form {kind} has not been created yet for year '{year}'")]
    FormNotCreated { kind: FormKind, year: String },
    #[error("form {kind} document {id} no longer exists")]
    FormDocument { kind: FormKind, id: String },
}

impl NotFound {
    /// Stable machine-readable name of the step.
    pub fn reason(&self) -> &'static str {
        match self {
            NotFound::TrainerProgress { .. } => "progress_not_found",
            NotFound::YearEntry { .. } => "year_not_found",
            NotFound::FormNotCreated { .. } => "form_not_created",
            NotFound::FormDocument { .. } => "form_document_not_found",
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError<E> {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("lookup cancelled")]
    Cancelled,
    #[error("data source failed: {0}")]
    Source(E),
}

/// The selected year, or the record's current year when nothing (or an
/// empty label) is selected.
pub fn target_year<'a>(progress: &'a TrainerProgress, selected: Option<&'a str>) -> &'a str {
    match selected {
        Some(label) if !label.is_empty() => label,
        _ => progress.current_training_year.as_str(),
    }
}

/// Year and slot lookup on an already loaded progress record.
pub fn locate_form_id<'p>(
    progress: &'p TrainerProgress,
    kind: FormKind,
    selected: Option<&str>,
) -> Result<&'p str, NotFound> {
    let year = target_year(progress, selected);
    let entry = progress.year(year).ok_or_else(|| NotFound::YearEntry {
        year: year.to_string(),
    })?;
    entry.forms.get(kind).ok_or_else(|| NotFound::FormNotCreated {
        kind,
        year: year.to_string(),
    })
}

fn ensure_live<E>(cancel: &CancelToken) -> Result<(), ResolveError<E>> {
    if cancel.is_cancelled() {
        return Err(ResolveError::Cancelled);
    }
    Ok(())
}

pub async fn resolve_form_id<S: ProgressSource>(
    source: &S,
    trainer_id: &str,
    kind: FormKind,
    selected: Option<&str>,
    cancel: &CancelToken,
) -> Result<String, ResolveError<S::Error>> {
    ensure_live::<S::Error>(cancel)?;
    let progress = source
        .progress(trainer_id)
        .await
        .map_err(ResolveError::Source)?;
    ensure_live::<S::Error>(cancel)?;
    let progress = progress.ok_or_else(|| NotFound::TrainerProgress {
        trainer_id: trainer_id.to_string(),
    })?;
    Ok(locate_form_id(&progress, kind, selected)?.to_string())
}

pub async fn resolve_form<S: ProgressSource>(
    source: &S,
    trainer_id: &str,
    kind: FormKind,
    selected: Option<&str>,
    cancel: &CancelToken,
) -> Result<FormDocument, ResolveError<S::Error>> {
    let id = resolve_form_id(source, trainer_id, kind, selected, cancel).await?;
    let form = source.form(kind, &id).await.map_err(ResolveError::Source)?;
    ensure_live::<S::Error>(cancel)?;
    Ok(form.ok_or(NotFound::FormDocument { kind, id })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::progress::YearEntry;
    use std::collections::HashMap;
    use std::convert::Infallible;

    #[derive(Default)]
    struct MemorySource {
        progress: HashMap<String, TrainerProgress>,
        forms: HashMap<(FormKind, String), FormDocument>,
        cancel_on_progress: Option<CancelToken>,
    }

    impl ProgressSource for MemorySource {
        type Error = Infallible;

        async fn progress(&self, trainer_id: &str) -> Result<Option<TrainerProgress>, Infallible> {
            if let Some(token) = &self.cancel_on_progress {
                token.cancel();
            }
            Ok(self.progress.get(trainer_id).cloned())
        }

        async fn form(&self, kind: FormKind, id: &str) -> Result<Option<FormDocument>, Infallible> {
            Ok(self.forms.get(&(kind, id.to_string())).cloned())
        }
    }

    struct FailingSource;

    impl ProgressSource for FailingSource {
        type Error = String;

        async fn progress(&self, _: &str) -> Result<Option<TrainerProgress>, String> {
            Err("connection refused".into())
        }

        async fn form(&self, _: FormKind, _: &str) -> Result<Option<FormDocument>, String> {
            Err("connection refused".into())
        }
    }

    fn two_year_source() -> MemorySource {
        let mut progress = TrainerProgress::starting("t1", "سال اول");
        progress.training_history[0].forms.set(FormKind::H, "h-1");
        let mut second = YearEntry {
            year_label: "سال دوم".into(),
            academic_year: "1403-1404".into(),
            ..YearEntry::default()
        };
        second.forms.set(FormKind::E, "e-2");
        second.forms.set(FormKind::H, "stale");
        progress.training_history.push(second);

        let mut source = MemorySource::default();
        source.progress.insert("t1".into(), progress);
        for (kind, id) in [(FormKind::H, "h-1"), (FormKind::E, "e-2")] {
            let doc = FormDocument {
                id: Some(id.into()),
                trainer: "t1".into(),
                ..FormDocument::default()
            };
            source.forms.insert((kind, id.into()), doc);
        }
        source
    }

    #[tokio::test]
    async fn falls_back_to_current_year() {
        let source = two_year_source();
        let id = resolve_form_id(&source, "t1", FormKind::H, None, &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(id, "h-1");
    }

    #[tokio::test]
    async fn empty_selection_means_current_year() {
        let source = two_year_source();
        let id = resolve_form_id(&source, "t1", FormKind::H, Some(""), &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(id, "h-1");
    }

    #[tokio::test]
    async fn selected_year_is_honoured() {
        let source = two_year_source();
        let doc = resolve_form(&source, "t1", FormKind::E, Some("سال دوم"), &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(doc.id.as_deref(), Some("e-2"));
    }

    #[tokio::test]
    async fn missing_year_is_distinct_from_missing_form() {
        let source = two_year_source();
        let token = CancelToken::new();

        let year = resolve_form_id(&source, "t1", FormKind::E, Some("سال سوم"), &token).await;
        assert!(matches!(
            year,
            Err(ResolveError::NotFound(NotFound::YearEntry { ref year })) if year == "سال سوم"
        ));

        let form = resolve_form_id(&source, "t1", FormKind::E, None, &token).await;
        match form {
            Err(ResolveError::NotFound(nf)) => {
                assert_eq!(nf.reason(), "form_not_created");
                assert_eq!(
                    nf,
                    NotFound::FormNotCreated {
                        kind: FormKind::E,
                        year: "سال اول".into()
                    }
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_trainer_reports_missing_progress() {
        let source = two_year_source();
        let result = resolve_form(&source, "nobody", FormKind::C, None, &CancelToken::new()).await;
        assert!(matches!(
            result,
            Err(ResolveError::NotFound(NotFound::TrainerProgress { .. }))
        ));
    }

    #[tokio::test]
    async fn dangling_reference_reports_missing_document() {
        let source = two_year_source();
        let result =
            resolve_form(&source, "t1", FormKind::H, Some("سال دوم"), &CancelToken::new()).await;
        match result {
            Err(ResolveError::NotFound(nf)) => assert_eq!(nf.reason(), "form_document_not_found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn year_label_match_is_exact() {
        let source = two_year_source();
        let result =
            resolve_form_id(&source, "t1", FormKind::H, Some("سال اول "), &CancelToken::new()).await;
        assert!(matches!(
            result,
            Err(ResolveError::NotFound(NotFound::YearEntry { .. }))
        ));
    }

    #[tokio::test]
    async fn cancelled_before_start_makes_no_request() {
        let token = CancelToken::new();
        token.cancel();
        let result = resolve_form_id(&FailingSource, "t1", FormKind::H, None, &token).await;
        assert!(matches!(result, Err(ResolveError::Cancelled)));
    }

    #[tokio::test]
    async fn cancellation_during_fetch_discards_the_result() {
        let token = CancelToken::new();
        let mut source = two_year_source();
        source.cancel_on_progress = Some(token.clone());
        let result = resolve_form(&source, "t1", FormKind::H, None, &token).await;
        assert!(matches!(result, Err(ResolveError::Cancelled)));
    }

    #[tokio::test]
    async fn source_failures_are_not_not_found() {
        let result =
            resolve_form_id(&FailingSource, "t1", FormKind::H, None, &CancelToken::new()).await;
        match result {
            Err(ResolveError::Source(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
