use common::model::form_kind::FormKind;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FormDetailProps {
    pub kind: FormKind,
    /// Training year to show. Empty or absent means the trainer's current
    /// year.
    #[prop_or_default]
    pub year: Option<AttrValue>,
}
