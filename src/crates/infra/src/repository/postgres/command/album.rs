use super::db_data::album::{self, ActiveModel, Entity, Model};
use super::db_data::photo::{self as photo_data, Entity as PhotoEntity};
use super::photo::upsert_photo;
use async_trait::async_trait;
use domain::album::{Album, AlbumError, AlbumRepository};
use domain::photo::Photo;
use domain::value::AlbumId;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::*;

#[derive(Clone)]
pub struct AlbumRepositoryImpl {
    db: DbConn,
}

impl AlbumRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 加载封面与附加照片，附加照片按 ID 升序
    async fn load_album(&self, model: Model) -> Result<Album, AlbumError> {
        let main_photo_id = model.main_photo_id;
        let mut album = Album::from(model);

        let mut photos: Vec<Photo> = PhotoEntity::find()
            .filter(photo_data::Column::AlbumId.eq(album.id.as_i64()))
            .order_by_asc(photo_data::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?
            .into_iter()
            .map(Photo::from)
            .collect();

        if let Some(main_id) = main_photo_id {
            album.main_photo = match photos.iter().position(|p| p.id.as_i64() == main_id) {
                Some(idx) => Some(photos.remove(idx)),
                None => PhotoEntity::find_by_id(main_id)
                    .one(&self.db)
                    .await
                    .map_err(|e| AlbumError::DbErr(e.to_string()))?
                    .map(Photo::from),
            };
        }
        album.photos = photos;

        Ok(album)
    }
}

#[async_trait]
impl AlbumRepository for AlbumRepositoryImpl {
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError> {
        let result: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        match result {
            Some(model) => Ok(Some(self.load_album(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Album>, AlbumError> {
        let models: Vec<Model> = Entity::find()
            .order_by_asc(album::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        let mut albums = Vec::with_capacity(models.len());
        for model in models {
            albums.push(self.load_album(model).await?);
        }
        Ok(albums)
    }

    async fn save(&self, album: &Album) -> Result<(), AlbumError> {
        let album_id = album.id.as_i64();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        let exists = Entity::find_by_id(album_id)
            .one(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?
            .is_some();

        // 封面引用在照片写入之后再更新
        let mut active_model: ActiveModel = album.into();
        active_model.main_photo_id = NotSet;
        if exists {
            active_model.created_at = NotSet;
            active_model
                .update(&txn)
                .await
                .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        } else {
            active_model
                .insert(&txn)
                .await
                .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        }

        let mut kept_ids = Vec::new();
        for photo in album.all_photos() {
            let mut photo = photo.clone();
            photo.album_id = Some(album.id);
            upsert_photo(&txn, &photo)
                .await
                .map_err(|e| AlbumError::DbErr(e.to_string()))?;
            kept_ids.push(photo.id.as_i64());
        }

        // 不再属于该相册的照片解除关联
        let mut detach = Condition::all().add(photo_data::Column::AlbumId.eq(album_id));
        if !kept_ids.is_empty() {
            detach = detach.add(photo_data::Column::Id.is_not_in(kept_ids.clone()));
        }
        PhotoEntity::update_many()
            .col_expr(photo_data::Column::AlbumId, Expr::value(Option::<i64>::None))
            .filter(detach)
            .exec(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        Entity::update_many()
            .col_expr(
                album::Column::MainPhotoId,
                Expr::value(album.main_photo_id().map(|id| id.as_i64())),
            )
            .filter(album::Column::Id.eq(album_id))
            .exec(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        debug!("Album {} saved with {} photos", album.id, kept_ids.len());
        Ok(())
    }

    async fn delete(&self, album: &Album) -> Result<(), AlbumError> {
        let album_id = album.id.as_i64();
        let photo_ids: Vec<i64> = album.all_photos().map(|p| p.id.as_i64()).collect();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        // 先断开封面引用，再删照片，最后删相册
        Entity::update_many()
            .col_expr(album::Column::MainPhotoId, Expr::value(Option::<i64>::None))
            .filter(album::Column::Id.eq(album_id))
            .exec(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        let mut condition = Condition::any().add(photo_data::Column::AlbumId.eq(album_id));
        if !photo_ids.is_empty() {
            condition = condition.add(photo_data::Column::Id.is_in(photo_ids));
        }
        let removed = PhotoEntity::delete_many()
            .filter(condition)
            .exec(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        Entity::delete_by_id(album_id)
            .exec(&txn)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;

        debug!(
            "Album {} deleted, {} photo records removed",
            album.id, removed.rows_affected
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::postgres::command::photo::PhotoRepositoryImpl;
    use crate::test_db::setup_db;
    use domain::photo::PhotoRepository;
    use domain::value::PhotoId;

    fn album_with_photos(id: i64, title: &str, main: i64, extra: &[i64]) -> Album {
        let mut album = Album::new(AlbumId::from(id), title);
        album.set_main_photo(Photo::new(
            PhotoId::from(main),
            "/photos",
            &format!("{}.jpg", main),
        ));
        for photo_id in extra {
            album.add_photo(Photo::new(
                PhotoId::from(*photo_id),
                "/photos",
                &format!("{}.jpg", photo_id),
            ));
        }
        album
    }

    #[tokio::test]
    async fn test_save_and_find_album() {
        let db = setup_db().await;
        let repo = AlbumRepositoryImpl::new(db);

        let album = album_with_photos(1, "Holidays", 10, &[12, 11]);
        repo.save(&album).await.unwrap();

        let found = repo.find_by_id(AlbumId::from(1)).await.unwrap().unwrap();
        assert_eq!(found.title, "Holidays");
        assert_eq!(found.main_photo_id(), Some(PhotoId::from(10)));
        assert_eq!(
            found.main_photo.as_ref().unwrap().album_id,
            Some(AlbumId::from(1))
        );
        let extra: Vec<i64> = found.photos.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(extra, vec![11, 12]);
        assert!(found
            .photos
            .iter()
            .all(|p| p.album_id == Some(AlbumId::from(1))));
    }

    #[tokio::test]
    async fn test_save_existing_photo_does_not_duplicate() {
        let db = setup_db().await;
        let photo_repo = PhotoRepositoryImpl::new(db.clone());
        let repo = AlbumRepositoryImpl::new(db);

        // 照片先单独入库，再作为封面写入相册
        let cover = Photo::new(PhotoId::from(5), "/photos", "cover.jpg");
        photo_repo.save(&cover).await.unwrap();

        let mut album = Album::new(AlbumId::from(2), "Trip");
        album.set_main_photo(cover);
        repo.save(&album).await.unwrap();

        let photos = photo_repo.find_all().await.unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].album_id, Some(AlbumId::from(2)));
    }

    #[tokio::test]
    async fn test_save_overwrites_album() {
        let db = setup_db().await;
        let photo_repo = PhotoRepositoryImpl::new(db.clone());
        let repo = AlbumRepositoryImpl::new(db);

        let album = album_with_photos(3, "Before", 30, &[31, 32]);
        repo.save(&album).await.unwrap();

        let mut updated = repo.find_by_id(AlbumId::from(3)).await.unwrap().unwrap();
        let created_at = updated.created_at;
        updated.created_at = created_at + chrono::Duration::days(1);
        updated.title = "After".to_string();
        updated.photos.retain(|p| p.id != PhotoId::from(31));
        repo.save(&updated).await.unwrap();

        let found = repo.find_by_id(AlbumId::from(3)).await.unwrap().unwrap();
        assert_eq!(found.title, "After");
        assert_eq!(found.created_at, created_at);
        assert_eq!(found.photos.len(), 1);
        assert_eq!(found.photos[0].id, PhotoId::from(32));

        // 被移出的照片仍在，只是不再属于相册
        let detached = photo_repo
            .find_by_id(PhotoId::from(31))
            .await
            .unwrap()
            .unwrap();
        assert!(detached.album_id.is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_ordered() {
        let db = setup_db().await;
        let repo = AlbumRepositoryImpl::new(db);

        repo.save(&album_with_photos(20, "Second", 200, &[]))
            .await
            .unwrap();
        repo.save(&album_with_photos(10, "First", 100, &[101]))
            .await
            .unwrap();
        repo.save(&Album::new(AlbumId::from(30), "Empty"))
            .await
            .unwrap();

        let albums = repo.find_all().await.unwrap();
        let titles: Vec<&str> = albums.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Empty"]);
        assert_eq!(albums[0].photos.len(), 1);
        assert!(albums[2].main_photo.is_none());
    }

    #[tokio::test]
    async fn test_delete_album_with_photos() {
        let db = setup_db().await;
        let photo_repo = PhotoRepositoryImpl::new(db.clone());
        let repo = AlbumRepositoryImpl::new(db);

        let doomed = album_with_photos(1, "Doomed", 10, &[11, 12]);
        repo.save(&doomed).await.unwrap();
        repo.save(&album_with_photos(2, "Survivor", 20, &[21]))
            .await
            .unwrap();
        photo_repo
            .save(&Photo::new(PhotoId::from(99), "/photos", "loose.jpg"))
            .await
            .unwrap();

        repo.delete(&doomed).await.unwrap();

        assert!(repo.find_by_id(AlbumId::from(1)).await.unwrap().is_none());
        let remaining: Vec<i64> = photo_repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.as_i64())
            .collect();
        assert_eq!(remaining, vec![20, 21, 99]);

        let survivor = repo.find_by_id(AlbumId::from(2)).await.unwrap().unwrap();
        assert_eq!(survivor.main_photo_id(), Some(PhotoId::from(20)));
        assert_eq!(survivor.photos.len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_album() {
        let db = setup_db().await;
        let repo = AlbumRepositoryImpl::new(db);

        assert!(repo.find_by_id(AlbumId::from(404)).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
