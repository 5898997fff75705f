use common::model::form::FormDocument;
use common::model::form_kind::FormKind;
use common::model::progress::TrainerProgress;
use common::progress::ProgressSource;

use super::{collections, Store, StoreError};

/// Lets the shared resolver run directly against the database.
impl ProgressSource for Store {
    type Error = StoreError;

    async fn progress(&self, trainer_id: &str) -> Result<Option<TrainerProgress>, StoreError> {
        self.get(collections::TRAINER_PROGRESS, trainer_id)
    }

    async fn form(&self, kind: FormKind, id: &str) -> Result<Option<FormDocument>, StoreError> {
        self.get(kind.collection(), id)
    }
}
