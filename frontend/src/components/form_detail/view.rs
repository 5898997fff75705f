use common::model::form::FormDocument;
use common::model::personal_info::PersonalInfo;
use yew::prelude::*;

use crate::components::score_table::ScoreTable;
use crate::helpers::not_found_message;

use super::messages::Msg;
use super::state::{FormDetail, Status};

pub fn view(component: &FormDetail, ctx: &Context<FormDetail>) -> Html {
    let kind = ctx.props().kind;

    let body = match (&component.status, &component.form) {
        (Status::NoTrainer, _) => html! {
            <p class="notice">{"Select a trainer to see their forms."}</p>
        },
        (Status::Loading, _) => html! { <p class="notice">{"Loading..."}</p> },
        (Status::Failed(message), _) => html! {
            <p class="notice error">{format!("Could not load the form: {}", message)}</p>
        },
        (Status::Missing(not_found), None) => html! {
            <p class="notice">{not_found_message(not_found)}</p>
        },
        (_, Some(form)) => form_body(component, ctx, form),
        (Status::Ready, None) => Html::default(),
    };

    html! {
        <section class="form-detail">
            <h2>{kind.title()}</h2>
            {body}
        </section>
    }
}

fn form_body(component: &FormDetail, ctx: &Context<FormDetail>, form: &FormDocument) -> Html {
    let link = ctx.link();
    let is_new = form.id.is_none();
    let dirty = component.is_dirty();
    let save_label = match (component.saving, is_new) {
        (true, _) => "Saving...",
        (false, true) => "Create form",
        (false, false) => "Save changes",
    };

    html! {
        <div>
            <p class="year-label">{format!("Training year: {}", form.year_label)}</p>
            {personal_info(&form.personal_info)}
            <ScoreTable
                rows={form.rows.clone()}
                sub_scores={ctx.props().kind.sub_score_count()}
                on_change={link.callback(Msg::RowsChanged)}
            />
            <div class="actions">
                if dirty {
                    <span class="dirty-indicator">{"Unsaved changes"}</span>
                }
                <button
                    disabled={component.saving || (!dirty && !is_new)}
                    onclick={link.callback(|_| Msg::Save)}
                >
                    {save_label}
                </button>
            </div>
        </div>
    }
}

fn personal_info(info: &PersonalInfo) -> Html {
    let fields = [
        ("First name", &info.first_name),
        ("Last name", &info.last_name),
        ("Father's name", &info.parent_name),
        ("Province", &info.province),
        ("Department", &info.department),
        ("Training year", &info.training_year),
    ];
    html! {
        <dl class="personal-info">
            { for fields.iter().map(|(label, value)| html! {
                <>
                    <dt>{*label}</dt>
                    <dd>{value.to_string()}</dd>
                </>
            }) }
        </dl>
    }
}
