use domain::album::AlbumError;
use domain::photo::PhotoError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}: {1}")]
    RepositoryError(String, String),
    #[error("Aggregate not found: {0}: {1}")]
    AggregateNotFound(String, String),
    #[error("Album error: {0}")]
    AlbumError(#[from] AlbumError),
    #[error("Photo error: {0}")]
    PhotoError(#[from] PhotoError),
    /// 照片文件读写失败
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl AppError {
    pub fn album_not_found(id: i64) -> Self {
        AppError::AggregateNotFound("Album".to_string(), format!("id {} not found", id))
    }

    pub fn photo_not_found(id: i64) -> Self {
        AppError::AggregateNotFound("Photo".to_string(), format!("id {} not found", id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::AggregateNotFound(..)
                | AppError::AlbumError(AlbumError::NotFound(_))
                | AppError::PhotoError(PhotoError::NotFound(_))
        )
    }
}
