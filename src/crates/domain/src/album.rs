use crate::photo::Photo;
use crate::value::{AlbumId, PhotoId};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use thiserror::Error;

/// 相册领域错误
#[derive(Error, Debug)]
pub enum AlbumError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Album not found: {0}")]
    NotFound(AlbumId),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("{0}")]
    OtherErr(String),
}

/// 相册聚合根
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    /// 封面照片，删除相册时一并删除
    pub main_photo: Option<Photo>,
    /// 附加照片，按加入顺序排列
    pub photos: Vec<Photo>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Album {
    /// 创建新相册
    pub fn new(id: AlbumId, title: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id,
            title: title.to_string(),
            main_photo: None,
            photos: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 设置封面照片
    pub fn set_main_photo(&mut self, mut photo: Photo) {
        photo.album_id = Some(self.id);
        self.main_photo = Some(photo);
        self.touch();
    }

    /// 追加照片
    pub fn add_photo(&mut self, mut photo: Photo) {
        photo.album_id = Some(self.id);
        self.photos.push(photo);
        self.touch();
    }

    pub fn main_photo_id(&self) -> Option<PhotoId> {
        self.main_photo.as_ref().map(|p| p.id)
    }

    /// 封面与附加照片
    pub fn all_photos(&self) -> impl Iterator<Item = &Photo> {
        self.main_photo.iter().chain(self.photos.iter())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().naive_utc();
    }
}

/// 相册仓储接口
///
/// `save` 与 `delete` 在同一个数据库事务内完成相册及其照片记录的写入。
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// 根据 ID 查找（同时加载封面与全部照片）
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError>;

    /// 查询全部相册
    async fn find_all(&self) -> Result<Vec<Album>, AlbumError>;

    /// 保存相册，整体覆盖
    async fn save(&self, album: &Album) -> Result<(), AlbumError>;

    /// 删除相册及其全部照片记录
    async fn delete(&self, album: &Album) -> Result<(), AlbumError>;
}
