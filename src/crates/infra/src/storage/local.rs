use application::command::photo::PhotoFileStore;
use application::error::AppError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// 本地磁盘照片存储
#[derive(Clone, Default)]
pub struct LocalPhotoFileStore;

impl LocalPhotoFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhotoFileStore for LocalPhotoFileStore {
    async fn write(&self, directory: &Path, file_name: &str, data: &[u8]) -> Result<(), AppError> {
        fs::create_dir_all(directory).await.map_err(|e| {
            AppError::StorageError(format!(
                "Saving file error {}: {}",
                directory.display(),
                e
            ))
        })?;

        // fs::write 会截断已存在的同名文件
        let file_path = directory.join(file_name);
        fs::write(&file_path, data).await.map_err(|e| {
            AppError::StorageError(format!("Saving file error {}: {}", file_name, e))
        })
    }

    async fn remove_if_exists(&self, path: &Path) -> Result<bool, AppError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::StorageError(format!(
                "Error deleting file {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
