use domain::album::Album;
use domain::value::AlbumId;
use sea_orm::entity::prelude::*;
use sea_orm::Set;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Default)]
#[sea_orm(table_name = "album")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[sea_orm(column_type = "BigInteger")]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "BigInteger", nullable)]
    pub main_photo_id: Option<i64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Photo,
    MainPhoto,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Photo => Entity::has_many(super::photo::Entity)
                .from(Column::Id)
                .to(super::photo::Column::AlbumId)
                .into(),
            Self::MainPhoto => Entity::belongs_to(super::photo::Entity)
                .from(Column::MainPhotoId)
                .to(super::photo::Column::Id)
                .into(),
        }
    }
}

impl Related<super::photo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Album> for ActiveModel {
    fn from(album: &Album) -> Self {
        Self {
            id: Set(album.id.as_i64()),
            title: Set(album.title.clone()),
            main_photo_id: Set(album.main_photo_id().map(|id| id.as_i64())),
            created_at: Set(album.created_at),
            updated_at: Set(album.updated_at),
        }
    }
}

/// 只还原相册本身，照片由仓储单独加载
impl From<Model> for Album {
    fn from(model: Model) -> Self {
        Album {
            id: AlbumId::from(model.id),
            title: model.title,
            main_photo: None,
            photos: Vec::new(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
