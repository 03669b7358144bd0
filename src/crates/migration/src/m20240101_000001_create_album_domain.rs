use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create photo table
        manager
            .create_table(
                Table::create()
                    .table(Photo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Photo::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Photo::Path).string().not_null())
                    .col(ColumnDef::new(Photo::FileName).string().not_null())
                    .col(ColumnDef::new(Photo::AlbumId).big_integer().null())
                    .col(ColumnDef::new(Photo::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create album table
        manager
            .create_table(
                Table::create()
                    .table(Album::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Album::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Album::Title).string().not_null())
                    .col(ColumnDef::new(Album::MainPhotoId).big_integer().null())
                    .col(ColumnDef::new(Album::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Album::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_album_main_photo_id")
                            .from(Album::Table, Album::MainPhotoId)
                            .to(Photo::Table, Photo::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // SQLite 不支持对已有表追加外键
        if manager.get_database_backend() != DatabaseBackend::Sqlite {
            manager
                .create_foreign_key(
                    ForeignKey::create()
                        .name("fk_photo_album_id")
                        .from(Photo::Table, Photo::AlbumId)
                        .to(Album::Table, Album::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade)
                        .to_owned(),
                )
                .await?;
        }

        // Create index on photo.album_id
        manager
            .create_index(
                Index::create()
                    .name("idx_photo_album_id")
                    .table(Photo::Table)
                    .col(Photo::AlbumId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DatabaseBackend::Sqlite {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name("fk_photo_album_id")
                        .table(Photo::Table)
                        .to_owned(),
                )
                .await?;
        }
        manager
            .drop_table(Table::drop().table(Album::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Photo::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Album {
    Table,
    Id,
    Title,
    MainPhotoId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Photo {
    Table,
    Id,
    Path,
    FileName,
    AlbumId,
    CreatedAt,
}
