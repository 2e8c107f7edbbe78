use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum StoreError {
    #[error("{entity} with id {id} was not found.")]
    NotFound { entity: &'static str, id: u64 },
}

impl StoreError {
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<u64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
