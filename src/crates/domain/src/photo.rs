use crate::value::{AlbumId, PhotoId};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// 照片领域错误
#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Photo not found: {0}")]
    NotFound(PhotoId),
    #[error("{0}")]
    OtherErr(String),
}

/// 照片实体
///
/// `path` 为存储目录，`file_name` 为上传时的原始文件名，
/// 两者拼接得到磁盘上的文件位置。
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: PhotoId,
    pub path: String,
    pub file_name: String,
    /// 所属相册（仅作查找字段）
    pub album_id: Option<AlbumId>,
    pub created_at: NaiveDateTime,
}

impl Photo {
    pub fn new(id: PhotoId, path: &str, file_name: &str) -> Self {
        Self {
            id,
            path: path.to_string(),
            file_name: file_name.to_string(),
            album_id: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// 文件在磁盘上的完整路径
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.path).join(&self.file_name)
    }
}

/// 照片仓储接口
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// 根据 ID 查找
    async fn find_by_id(&self, id: PhotoId) -> Result<Option<Photo>, PhotoError>;

    /// 查询全部照片
    async fn find_all(&self) -> Result<Vec<Photo>, PhotoError>;

    /// 保存照片（存在则覆盖）
    async fn save(&self, photo: &Photo) -> Result<(), PhotoError>;

    /// 删除照片记录
    async fn delete(&self, id: PhotoId) -> Result<(), PhotoError>;
}
