use super::photo::PhotoFileStore;
use super::shared::IdGenerator;
use crate::error::AppError;
use async_trait::async_trait;
use domain::album::{Album, AlbumError, AlbumRepository};
use domain::photo::{Photo, PhotoError, PhotoRepository};
use domain::value::{AlbumId, PhotoId};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct SequenceIdGenerator {
    next: AtomicI64,
}

#[async_trait]
impl IdGenerator for SequenceIdGenerator {
    async fn next_id(&self) -> Result<i64, AppError> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Default)]
pub struct InMemoryPhotoRepository {
    photos: Mutex<BTreeMap<i64, Photo>>,
}

impl InMemoryPhotoRepository {
    pub fn len(&self) -> usize {
        self.photos.lock().unwrap().len()
    }

    pub fn count_for_album(&self, album_id: i64) -> usize {
        self.photos
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.album_id == Some(AlbumId::from(album_id)))
            .count()
    }

    fn remove_where(&self, f: impl Fn(&Photo) -> bool) {
        self.photos.lock().unwrap().retain(|_, p| !f(p));
    }
}

#[async_trait]
impl PhotoRepository for InMemoryPhotoRepository {
    async fn find_by_id(&self, id: PhotoId) -> Result<Option<Photo>, PhotoError> {
        Ok(self.photos.lock().unwrap().get(&id.as_i64()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Photo>, PhotoError> {
        Ok(self.photos.lock().unwrap().values().cloned().collect())
    }

    async fn save(&self, photo: &Photo) -> Result<(), PhotoError> {
        self.photos
            .lock()
            .unwrap()
            .insert(photo.id.as_i64(), photo.clone());
        Ok(())
    }

    async fn delete(&self, id: PhotoId) -> Result<(), PhotoError> {
        self.photos.lock().unwrap().remove(&id.as_i64());
        Ok(())
    }
}

/// 相册与照片共用一份照片表，模拟级联写入与删除
pub struct InMemoryAlbumRepository {
    albums: Mutex<BTreeMap<i64, Album>>,
    photos: Arc<InMemoryPhotoRepository>,
}

impl InMemoryAlbumRepository {
    pub fn new(photos: Arc<InMemoryPhotoRepository>) -> Self {
        Self {
            albums: Mutex::new(BTreeMap::new()),
            photos,
        }
    }

    pub fn len(&self) -> usize {
        self.albums.lock().unwrap().len()
    }
}

#[async_trait]
impl AlbumRepository for InMemoryAlbumRepository {
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError> {
        Ok(self.albums.lock().unwrap().get(&id.as_i64()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Album>, AlbumError> {
        Ok(self.albums.lock().unwrap().values().cloned().collect())
    }

    async fn save(&self, album: &Album) -> Result<(), AlbumError> {
        for photo in album.all_photos() {
            self.photos
                .save(photo)
                .await
                .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        }
        self.albums
            .lock()
            .unwrap()
            .insert(album.id.as_i64(), album.clone());
        Ok(())
    }

    async fn delete(&self, album: &Album) -> Result<(), AlbumError> {
        let ids: Vec<PhotoId> = album.all_photos().map(|p| p.id).collect();
        self.photos
            .remove_where(|p| ids.contains(&p.id) || p.album_id == Some(album.id));
        self.albums.lock().unwrap().remove(&album.id.as_i64());
        Ok(())
    }
}

/// 直接读写本地磁盘
pub struct LocalFileStore;

#[async_trait]
impl PhotoFileStore for LocalFileStore {
    async fn write(&self, directory: &Path, file_name: &str, data: &[u8]) -> Result<(), AppError> {
        std::fs::create_dir_all(directory).map_err(|e| AppError::StorageError(e.to_string()))?;
        std::fs::write(directory.join(file_name), data)
            .map_err(|e| AppError::StorageError(e.to_string()))
    }

    async fn remove_if_exists(&self, path: &Path) -> Result<bool, AppError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::StorageError(e.to_string())),
        }
    }
}

/// 所有文件操作都失败
pub struct FailingFileStore;

#[async_trait]
impl PhotoFileStore for FailingFileStore {
    async fn write(&self, directory: &Path, _file_name: &str, _data: &[u8]) -> Result<(), AppError> {
        Err(AppError::StorageError(format!(
            "cannot write into {}",
            directory.display()
        )))
    }

    async fn remove_if_exists(&self, path: &Path) -> Result<bool, AppError> {
        Err(AppError::StorageError(format!(
            "cannot remove {}",
            path.display()
        )))
    }
}
