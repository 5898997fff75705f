//! Small UI utilities shared by the views.

use common::progress::NotFound;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Displays a temporary notification at the bottom of the screen. The toast
/// removes itself after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Vazirmatn, Tahoma, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Plain-language text for each way a form lookup can come up empty.
pub fn not_found_message(not_found: &NotFound) -> String {
    match not_found {
        NotFound::TrainerProgress { .. } => {
            "No training record exists for this trainer yet.".to_string()
        }
        NotFound::YearEntry { year } => {
            format!("Training year '{}' is not in this trainer's history.", year)
        }
        NotFound::FormNotCreated { kind, year } => {
            format!("{} has not been filled in for '{}' yet.", kind.title(), year)
        }
        NotFound::FormDocument { kind, .. } => format!(
            "The {} linked to this year no longer exists.",
            kind.title().to_lowercase()
        ),
    }
}

/// MD5 of the serialized document, for unsaved-change tracking.
pub fn compute_md5<T: serde::Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value)
        .ok()
        .map(|json| format!("{:x}", md5::compute(json)))
}
