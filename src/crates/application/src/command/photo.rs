use std::path::Path;
use std::sync::Arc;

use super::shared::IdGenerator;
use crate::dto::PhotoDto;
use crate::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use domain::photo::{Photo, PhotoRepository};
use domain::value::PhotoId;
use log::{debug, info};

/// 照片文件存储接口
#[async_trait]
pub trait PhotoFileStore: Send + Sync {
    /// 将内容写入 `directory/file_name`，同名文件直接覆盖
    async fn write(&self, directory: &Path, file_name: &str, data: &[u8]) -> Result<(), AppError>;

    /// 删除文件，文件不存在时返回 `Ok(false)`
    async fn remove_if_exists(&self, path: &Path) -> Result<bool, AppError>;
}

/// 上传的照片文件
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    original_name: String,
    data: Bytes,
}

impl UploadedPhoto {
    pub fn new(original_name: &str, data: impl Into<Bytes>) -> Self {
        Self {
            original_name: original_name.to_string(),
            data: data.into(),
        }
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 照片应用服务
pub struct PhotoService {
    photo_repository: Arc<dyn PhotoRepository>,
    file_store: Arc<dyn PhotoFileStore>,
    id_generator: Arc<dyn IdGenerator>,
}

impl PhotoService {
    pub fn new(
        photo_repository: Arc<dyn PhotoRepository>,
        file_store: Arc<dyn PhotoFileStore>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            photo_repository,
            file_store,
            id_generator,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<PhotoDto>, AppError> {
        let photos = self.photo_repository.find_all().await?;
        Ok(photos.iter().map(PhotoDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<PhotoDto, AppError> {
        let photo = self
            .photo_repository
            .find_by_id(PhotoId::from(id))
            .await?
            .ok_or_else(|| AppError::photo_not_found(id))?;
        Ok(PhotoDto::from(&photo))
    }

    /// 保存照片记录，没有 ID 时分配新 ID
    pub async fn save(&self, photo_dto: PhotoDto) -> Result<PhotoDto, AppError> {
        let id = match photo_dto.id {
            Some(id) => id,
            None => self.id_generator.next_id().await?,
        };
        let photo = photo_dto.into_photo(PhotoId::from(id));
        self.photo_repository.save(&photo).await?;
        Ok(PhotoDto::from(&photo))
    }

    pub async fn update(&self, photo_dto: PhotoDto) -> Result<PhotoDto, AppError> {
        self.save(photo_dto).await
    }

    /// 只删除记录，不动磁盘文件
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.photo_repository.delete(PhotoId::from(id)).await?;
        Ok(())
    }

    /// 把上传文件写入目录并创建照片记录
    pub async fn create_photo_entity(
        &self,
        upload: &UploadedPhoto,
        directory: &str,
    ) -> Result<PhotoDto, AppError> {
        self.file_store
            .write(Path::new(directory), upload.original_name(), upload.data())
            .await?;

        let id = self.id_generator.next_id().await?;
        let photo = Photo::new(PhotoId::from(id), directory, upload.original_name());
        self.photo_repository.save(&photo).await?;

        info!(
            "Photo {} saved to {}",
            photo.id,
            photo.file_path().display()
        );
        Ok(PhotoDto::from(&photo))
    }

    /// 删除照片文件，文件不存在不算错误
    pub async fn delete_photo_file(&self, path: &Path) -> Result<(), AppError> {
        if !self.file_store.remove_if_exists(path).await? {
            debug!("Photo file {} already gone", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::{
        FailingFileStore, InMemoryPhotoRepository, LocalFileStore, SequenceIdGenerator,
    };
    use tempfile::TempDir;

    fn photo_service(repo: Arc<InMemoryPhotoRepository>) -> PhotoService {
        PhotoService::new(
            repo,
            Arc::new(LocalFileStore),
            Arc::new(SequenceIdGenerator::default()),
        )
    }

    #[tokio::test]
    async fn test_create_photo_entity_writes_file_and_record() {
        let temp_dir = TempDir::new().unwrap();
        let directory = temp_dir.path().to_str().unwrap();
        let repo = Arc::new(InMemoryPhotoRepository::default());
        let service = photo_service(repo.clone());

        let upload = UploadedPhoto::new("test-image.jpg", b"test data".to_vec());
        let photo = service.create_photo_entity(&upload, directory).await.unwrap();

        assert_eq!(photo.file_name, "test-image.jpg");
        assert_eq!(photo.path, directory);
        let on_disk = std::fs::read(temp_dir.path().join("test-image.jpg")).unwrap();
        assert_eq!(on_disk, b"test data");
        assert_eq!(repo.len(), 1);
        assert_eq!(service.get_by_id(photo.id.unwrap()).await.unwrap(), photo);
    }

    #[tokio::test]
    async fn test_create_photo_entity_overwrites_same_name() {
        let temp_dir = TempDir::new().unwrap();
        let directory = temp_dir.path().to_str().unwrap();
        let service = photo_service(Arc::new(InMemoryPhotoRepository::default()));

        service
            .create_photo_entity(&UploadedPhoto::new("dup.jpg", b"first".to_vec()), directory)
            .await
            .unwrap();
        service
            .create_photo_entity(&UploadedPhoto::new("dup.jpg", b"second".to_vec()), directory)
            .await
            .unwrap();

        let on_disk = std::fs::read(temp_dir.path().join("dup.jpg")).unwrap();
        assert_eq!(on_disk, b"second");
    }

    #[tokio::test]
    async fn test_create_photo_entity_storage_failure_saves_nothing() {
        let repo = Arc::new(InMemoryPhotoRepository::default());
        let service = PhotoService::new(
            repo.clone(),
            Arc::new(FailingFileStore),
            Arc::new(SequenceIdGenerator::default()),
        );

        let err = service
            .create_photo_entity(&UploadedPhoto::new("a.jpg", b"x".to_vec()), "/nowhere")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::StorageError(_)));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let service = photo_service(Arc::new(InMemoryPhotoRepository::default()));

        let err = service.get_by_id(100).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_save_list_update_delete() {
        let repo = Arc::new(InMemoryPhotoRepository::default());
        let service = photo_service(repo.clone());

        let first = service
            .save(PhotoDto::new("/path/to", "photo1.jpg"))
            .await
            .unwrap();
        service
            .save(PhotoDto::new("/path/to", "photo2.jpg"))
            .await
            .unwrap();

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].file_name, "photo1.jpg");

        let mut changed = first.clone();
        changed.path = "/other".to_string();
        service.update(changed).await.unwrap();
        assert_eq!(service.get_by_id(first.id.unwrap()).await.unwrap().path, "/other");
        assert_eq!(repo.len(), 2);

        service.delete(first.id.unwrap()).await.unwrap();
        assert_eq!(repo.len(), 1);
        assert!(service.get_by_id(first.id.unwrap()).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_photo_file() {
        let temp_dir = TempDir::new().unwrap();
        let service = photo_service(Arc::new(InMemoryPhotoRepository::default()));

        let path = temp_dir.path().join("gone.jpg");
        std::fs::write(&path, b"bytes").unwrap();

        service.delete_photo_file(&path).await.unwrap();
        assert!(!path.exists());

        // 再删一次也不报错
        service.delete_photo_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_photo_file_io_failure_escalates() {
        let service = PhotoService::new(
            Arc::new(InMemoryPhotoRepository::default()),
            Arc::new(FailingFileStore),
            Arc::new(SequenceIdGenerator::default()),
        );

        let err = service
            .delete_photo_file(Path::new("/any/file.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StorageError(_)));
    }
}
