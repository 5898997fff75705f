use validator::Validate;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::save_form;
use crate::helpers::{compute_md5, not_found_message, show_toast};

use super::messages::Msg;
use super::state::{FormDetail, Status};

pub fn update(component: &mut FormDetail, ctx: &Context<FormDetail>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(form) => {
            component.original_md5 = compute_md5(&form);
            component.form = Some(form);
            component.status = Status::Ready;
            true
        }
        Msg::Missing(not_found, draft) => {
            show_toast(&not_found_message(&not_found));
            component.original_md5 = draft.as_ref().and_then(compute_md5);
            component.form = draft;
            component.status = Status::Missing(not_found);
            true
        }
        Msg::Failed(message) => {
            gloo_console::error!(format!("form lookup failed: {}", message));
            show_toast("Could not reach the server.");
            component.status = Status::Failed(message);
            true
        }
        Msg::RowsChanged(rows) => {
            if let Some(form) = component.form.as_mut() {
                form.rows = rows;
            }
            true
        }
        Msg::Save => {
            let Some(form) = component.form.clone() else {
                return false;
            };
            if component.saving {
                return false;
            }
            // Same rules the server applies; nothing is sent when they fail.
            if let Err(errors) = form.validate() {
                show_toast(&format!("Please fix the form: {}", errors));
                return false;
            }
            component.saving = true;
            let link = ctx.link().clone();
            let kind = ctx.props().kind;
            let signal = component.abort.as_ref().map(|c| c.signal());
            spawn_local(async move {
                match save_form(kind, &form, signal.as_ref()).await {
                    Ok(saved) => link.send_message(Msg::Saved(saved)),
                    Err(e) => link.send_message(Msg::SaveFailed(e.to_string())),
                }
            });
            true
        }
        Msg::Saved(form) => {
            component.saving = false;
            component.original_md5 = compute_md5(&form);
            component.form = Some(form);
            component.status = Status::Ready;
            show_toast("Form saved.");
            true
        }
        Msg::SaveFailed(message) => {
            component.saving = false;
            show_toast(&format!("Saving failed: {}", message));
            true
        }
    }
}
