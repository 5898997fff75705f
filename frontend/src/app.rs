//! Root component: owns the trainer selection and provides it to the views
//! as [`TrainerContext`].

use common::model::form_kind::FormKind;
use common::session::TrainerSelection;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::form_detail::FormDetail;
use crate::helpers::show_toast;
use crate::session::{LocalStore, TrainerContext};

pub enum Msg {
    SelectTrainer(String),
    SelectKind(String),
    SetYear(String),
}

pub struct App {
    selection: TrainerSelection<LocalStore>,
    kind: FormKind,
    year: String,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            selection: TrainerSelection::load(LocalStore),
            kind: FormKind::C,
            year: String::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectTrainer(id) => {
                if let Err(e) = self.selection.select(id.trim()) {
                    gloo_console::warn!(format!("trainer selection not persisted: {}", e));
                    show_toast("The selection will not survive a reload.");
                }
                true
            }
            Msg::SelectKind(tag) => match tag.parse::<FormKind>() {
                Ok(kind) => {
                    self.kind = kind;
                    true
                }
                Err(_) => false,
            },
            Msg::SetYear(year) => {
                self.year = year;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let trainer_id = self
            .selection
            .trainer_id()
            .map(|id| AttrValue::from(id.to_string()));
        let context = TrainerContext {
            trainer_id: trainer_id.clone(),
        };
        let year = (!self.year.is_empty()).then(|| AttrValue::from(self.year.clone()));
        // A new key remounts the detail view; the old one aborts its requests.
        let detail_key = format!(
            "{}|{}|{}",
            trainer_id.as_deref().unwrap_or_default(),
            self.kind,
            self.year
        );

        html! {
            <ContextProvider<TrainerContext> context={context}>
                <header class="toolbar">
                    <label>
                        {"Trainer"}
                        <input
                            type="text"
                            value={trainer_id.clone().unwrap_or_default()}
                            onchange={link.callback(|e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::SelectTrainer(input.value())
                            })}
                        />
                    </label>
                    <label>
                        {"Form"}
                        <select onchange={link.callback(|e: Event| {
                            let select: HtmlSelectElement = e.target_unchecked_into();
                            Msg::SelectKind(select.value())
                        })}>
                            { for FormKind::ALL.iter().map(|kind| html! {
                                <option value={kind.letter().to_string()} selected={*kind == self.kind}>
                                    {kind.title()}
                                </option>
                            }) }
                        </select>
                    </label>
                    <label>
                        {"Year"}
                        <input
                            type="text"
                            placeholder="current year"
                            value={self.year.clone()}
                            onchange={link.callback(|e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::SetYear(input.value())
                            })}
                        />
                    </label>
                </header>
                <main>
                    <FormDetail key={detail_key} kind={self.kind} {year} />
                </main>
            </ContextProvider<TrainerContext>>
        }
    }
}
