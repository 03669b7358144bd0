pub mod album;
pub mod consts;
pub mod resources;
pub mod view;

use application::command::album::AlbumService;
use application::command::photo::{PhotoFileStore, PhotoService};
use application::command::shared::IdGenerator;
use application::error::AppError;
use infra::config::{AppConfigImpl, DatabaseConfig};
use infra::id_generator::SnowflakeIdGenerator;
use infra::storage::LocalPhotoFileStore;
use infra::{AlbumRepositoryImpl, PhotoRepositoryImpl};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::sync::Arc;

pub struct AppState {
    pub app_cfg: AppConfigImpl,
    pub db: DatabaseConnection,
    pub id_generator: Arc<dyn IdGenerator>,
    pub file_store: Arc<dyn PhotoFileStore>,
}

impl AppState {
    pub async fn init_db(db_url: &str, pool: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
        use log::info;
        use std::time::Duration;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(pool.max_connections)
            .min_connections(pool.min_connections)
            .connect_timeout(Duration::from_secs(3))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(300))
            .sqlx_logging(false)
            .sqlx_logging_level(log::LevelFilter::Info);

        let db = Database::connect(opt).await?;

        let backend = db.get_database_backend();
        db.execute(Statement::from_string(backend, "SELECT 1".to_owned()))
            .await?;

        info!("Database connection pool initialized successfully");
        Ok(db)
    }

    pub fn new(db: DatabaseConnection, app_cfg: AppConfigImpl) -> Result<Self, AppError> {
        let id_generator: Arc<dyn IdGenerator> = Arc::new(SnowflakeIdGenerator::new(1)?);

        Ok(Self {
            app_cfg,
            db,
            id_generator,
            file_store: Arc::new(LocalPhotoFileStore::new()),
        })
    }

    pub fn photo_service(&self) -> Arc<PhotoService> {
        Arc::new(PhotoService::new(
            Arc::new(PhotoRepositoryImpl::new(self.db.clone())),
            self.file_store.clone(),
            self.id_generator.clone(),
        ))
    }

    pub fn album_service(&self) -> AlbumService {
        AlbumService::new(
            Arc::new(AlbumRepositoryImpl::new(self.db.clone())),
            self.photo_service(),
            self.id_generator.clone(),
        )
    }
}
