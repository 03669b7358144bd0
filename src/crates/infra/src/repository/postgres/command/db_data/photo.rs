use domain::photo::Photo;
use domain::value::{AlbumId, PhotoId};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Default)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub path: String,
    pub file_name: String,
    #[sea_orm(column_type = "BigInteger", nullable)]
    pub album_id: Option<i64>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Album,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Album => Entity::belongs_to(super::album::Entity)
                .from(Column::AlbumId)
                .to(super::album::Column::Id)
                .into(),
        }
    }
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Photo> for ActiveModel {
    fn from(photo: &Photo) -> Self {
        Self {
            id: Set(photo.id.as_i64()),
            path: Set(photo.path.clone()),
            file_name: Set(photo.file_name.clone()),
            album_id: Set(photo.album_id.map(|id| id.as_i64())),
            created_at: Set(photo.created_at),
        }
    }
}

impl From<Model> for Photo {
    fn from(model: Model) -> Self {
        Photo {
            id: PhotoId::from(model.id),
            path: model.path,
            file_name: model.file_name,
            album_id: model.album_id.map(AlbumId::from),
            created_at: model.created_at,
        }
    }
}
