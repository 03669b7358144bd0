use crate::error::AppError;
use domain::album::Album;
use domain::photo::Photo;
use domain::value::{AlbumId, PhotoId};
use std::path::PathBuf;

/// 相册标题为空时的提示
pub const TITLE_REQUIRED: &str = "Title is required";

/// 照片传输对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoDto {
    pub id: Option<i64>,
    pub path: String,
    pub file_name: String,
    pub album_id: Option<i64>,
}

impl PhotoDto {
    pub fn new(path: &str, file_name: &str) -> Self {
        Self {
            id: None,
            path: path.to_string(),
            file_name: file_name.to_string(),
            album_id: None,
        }
    }

    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.path).join(&self.file_name)
    }

    pub fn into_photo(self, id: PhotoId) -> Photo {
        let mut photo = Photo::new(id, &self.path, &self.file_name);
        photo.album_id = self.album_id.map(AlbumId::from);
        photo
    }

    /// 已持久化的照片才能挂到相册上
    fn into_persisted_photo(self) -> Result<Photo, AppError> {
        let id = self.id.ok_or_else(|| {
            AppError::InvalidInput(format!("photo {} has not been saved yet", self.file_name))
        })?;
        Ok(self.into_photo(PhotoId::from(id)))
    }
}

impl From<&Photo> for PhotoDto {
    fn from(photo: &Photo) -> Self {
        Self {
            id: Some(photo.id.as_i64()),
            path: photo.path.clone(),
            file_name: photo.file_name.clone(),
            album_id: photo.album_id.map(|id| id.as_i64()),
        }
    }
}

/// 相册传输对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumDto {
    pub id: Option<i64>,
    pub title: String,
    pub main_photo: Option<PhotoDto>,
    pub photos: Vec<PhotoDto>,
}

impl AlbumDto {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// 表单校验：标题不能为空白
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidInput(TITLE_REQUIRED.to_string()));
        }
        Ok(())
    }

    pub fn into_album(self, id: AlbumId) -> Result<Album, AppError> {
        let mut album = Album::new(id, &self.title);
        if let Some(main_photo) = self.main_photo {
            album.set_main_photo(main_photo.into_persisted_photo()?);
        }
        for photo in self.photos {
            album.add_photo(photo.into_persisted_photo()?);
        }
        Ok(album)
    }
}

impl From<&Album> for AlbumDto {
    fn from(album: &Album) -> Self {
        Self {
            id: Some(album.id.as_i64()),
            title: album.title.clone(),
            main_photo: album.main_photo.as_ref().map(PhotoDto::from),
            photos: album.photos.iter().map(PhotoDto::from).collect(),
        }
    }
}
