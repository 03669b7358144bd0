use std::sync::Arc;

use super::photo::PhotoService;
use super::shared::IdGenerator;
use crate::dto::{AlbumDto, PhotoDto};
use crate::error::AppError;
use domain::album::AlbumRepository;
use domain::value::{AlbumId, PhotoId};
use log::info;

/// 相册应用服务
pub struct AlbumService {
    album_repository: Arc<dyn AlbumRepository>,
    photo_service: Arc<PhotoService>,
    id_generator: Arc<dyn IdGenerator>,
}

impl AlbumService {
    pub fn new(
        album_repository: Arc<dyn AlbumRepository>,
        photo_service: Arc<PhotoService>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            album_repository,
            photo_service,
            id_generator,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<AlbumDto>, AppError> {
        let albums = self.album_repository.find_all().await?;
        Ok(albums.iter().map(AlbumDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<AlbumDto, AppError> {
        let album = self
            .album_repository
            .find_by_id(AlbumId::from(id))
            .await?
            .ok_or_else(|| AppError::album_not_found(id))?;
        Ok(AlbumDto::from(&album))
    }

    /// 整体覆盖保存，没有 ID 时分配新 ID
    pub async fn save(&self, album_dto: AlbumDto) -> Result<AlbumDto, AppError> {
        let id = match album_dto.id {
            Some(id) => id,
            None => self.id_generator.next_id().await?,
        };
        let album = album_dto.into_album(AlbumId::from(id))?;
        self.album_repository.save(&album).await?;
        Ok(AlbumDto::from(&album))
    }

    pub async fn update(&self, album_dto: AlbumDto) -> Result<AlbumDto, AppError> {
        self.save(album_dto).await
    }

    /// 创建相册并设置封面，照片与相册记录在同一事务内写入
    pub async fn create_album_entity(
        &self,
        album_dto: AlbumDto,
        main_photo: PhotoDto,
    ) -> Result<AlbumDto, AppError> {
        let album_id = match album_dto.id {
            Some(id) => id,
            None => self.id_generator.next_id().await?,
        };
        let photo_id = match main_photo.id {
            Some(id) => id,
            None => self.id_generator.next_id().await?,
        };

        let mut album = album_dto.into_album(AlbumId::from(album_id))?;
        album.set_main_photo(main_photo.into_photo(PhotoId::from(photo_id)));
        self.album_repository.save(&album).await?;

        info!("Album {} created with main photo {}", album.id, photo_id);
        Ok(AlbumDto::from(&album))
    }

    /// 向相册追加一张已保存的照片，封面不变
    pub async fn add_photo(&self, album_id: i64, photo: PhotoDto) -> Result<AlbumDto, AppError> {
        let mut album_dto = self.get_by_id(album_id).await?;
        album_dto.photos.push(photo);
        self.save(album_dto).await
    }

    /// 删除相册、封面、全部照片记录以及磁盘文件
    ///
    /// 记录在一个事务内删除，提交后再删文件；删文件失败直接返回错误，
    /// 此时记录已不存在，残留文件需人工清理。
    pub async fn delete_album(&self, album_id: i64) -> Result<(), AppError> {
        let album = self
            .album_repository
            .find_by_id(AlbumId::from(album_id))
            .await?
            .ok_or_else(|| AppError::album_not_found(album_id))?;

        self.album_repository.delete(&album).await?;

        for photo in album.all_photos() {
            self.photo_service
                .delete_photo_file(&photo.file_path())
                .await?;
        }

        info!(
            "Album {} deleted together with {} photos",
            album.id,
            album.all_photos().count()
        );
        Ok(())
    }
}
