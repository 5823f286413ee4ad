use crate::directory::DirectoryError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl From<DirectoryError> for CoreError {
    fn from(err: DirectoryError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
