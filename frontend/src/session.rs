//! Browser side of the trainer selection: `localStorage` as the
//! [`KeyValueStore`], and the context value handed to every view that needs
//! the selected trainer.

use common::session::{KeyValueStore, SessionError};
use wasm_bindgen::JsValue;
use web_sys::Storage;
use yew::prelude::*;

/// `window.localStorage`, looked up on every call so a blocked storage
/// (private mode, disabled cookies) degrades to an error instead of a panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

fn storage() -> Result<Storage, SessionError> {
    web_sys::window()
        .ok_or_else(|| SessionError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| SessionError::Unavailable("localStorage disabled".into()))
}

fn js_error(value: JsValue) -> SessionError {
    SessionError::Unavailable(format!("{:?}", value))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        storage()?.remove_item(key).map_err(js_error)
    }
}

/// What views see of the selection.
#[derive(Clone, PartialEq)]
pub struct TrainerContext {
    pub trainer_id: Option<AttrValue>,
}
