pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_album_domain;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_album_domain::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn test_up_and_down() {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("album").await.unwrap());
        assert!(manager.has_table("photo").await.unwrap());

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("album").await.unwrap());
        assert!(!manager.has_table("photo").await.unwrap());
    }
}
