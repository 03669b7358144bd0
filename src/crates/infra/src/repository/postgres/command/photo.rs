use super::db_data::photo::{self, ActiveModel, Entity, Model};
use async_trait::async_trait;
use domain::photo::{Photo, PhotoError, PhotoRepository};
use domain::value::PhotoId;
use sea_orm::ActiveValue::NotSet;
use sea_orm::*;

/// 插入或覆盖一条照片记录，保留原有的 created_at
pub(crate) async fn upsert_photo<C: ConnectionTrait>(conn: &C, photo: &Photo) -> Result<(), DbErr> {
    let exists = Entity::find_by_id(photo.id.as_i64())
        .one(conn)
        .await?
        .is_some();

    let mut active_model: ActiveModel = photo.into();
    if exists {
        active_model.created_at = NotSet;
        active_model.update(conn).await?;
    } else {
        active_model.insert(conn).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct PhotoRepositoryImpl {
    db: DbConn,
}

impl PhotoRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PhotoRepository for PhotoRepositoryImpl {
    async fn find_by_id(&self, id: PhotoId) -> Result<Option<Photo>, PhotoError> {
        let result: Option<Model> = Entity::find_by_id(id.as_i64())
            .one(&self.db)
            .await
            .map_err(|e| PhotoError::DbErr(e.to_string()))?;

        Ok(result.map(Photo::from))
    }

    async fn find_all(&self) -> Result<Vec<Photo>, PhotoError> {
        let photos: Vec<Model> = Entity::find()
            .order_by_asc(photo::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PhotoError::DbErr(e.to_string()))?;

        Ok(photos.into_iter().map(Photo::from).collect())
    }

    async fn save(&self, photo: &Photo) -> Result<(), PhotoError> {
        upsert_photo(&self.db, photo)
            .await
            .map_err(|e| PhotoError::DbErr(e.to_string()))
    }

    async fn delete(&self, id: PhotoId) -> Result<(), PhotoError> {
        Entity::delete_by_id(id.as_i64())
            .exec(&self.db)
            .await
            .map_err(|e| PhotoError::DbErr(e.to_string()))?;

        Ok(())
    }
}
