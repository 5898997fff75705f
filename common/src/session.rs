//! Which trainer the user is working on.
//!
//! The selection is plain application state, handed down explicitly and
//! persisted through a [`KeyValueStore`] so it survives a page reload. The
//! browser build plugs in `localStorage`; tests use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

pub const TRAINER_ID_KEY: &str = "trainerId";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("no trainer selected")]
    NoTrainerSelected,
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// The selected trainer id plus the store it is mirrored to.
#[derive(Debug)]
pub struct TrainerSelection<S: KeyValueStore> {
    store: S,
    trainer_id: Option<String>,
}

impl<S: KeyValueStore> TrainerSelection<S> {
    /// Restores the last selection from the store. A store that cannot be
    /// read starts with nothing selected.
    pub fn load(store: S) -> Self {
        let trainer_id = store
            .get(TRAINER_ID_KEY)
            .ok()
            .flatten()
            .filter(|id| !id.trim().is_empty());
        Self { store, trainer_id }
    }

    pub fn trainer_id(&self) -> Option<&str> {
        self.trainer_id.as_deref()
    }

    /// The selection, or `NoTrainerSelected` so callers can stop before
    /// issuing any request.
    pub fn require(&self) -> Result<&str, SessionError> {
        self.trainer_id().ok_or(SessionError::NoTrainerSelected)
    }

    pub fn select(&mut self, trainer_id: &str) -> Result<(), SessionError> {
        if trainer_id.trim().is_empty() {
            return self.clear();
        }
        self.store.set(TRAINER_ID_KEY, trainer_id)?;
        self.trainer_id = Some(trainer_id.to_string());
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.store.remove(TRAINER_ID_KEY)?;
        self.trainer_id = None;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
