use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// 内存 SQLite，只保留一个连接，避免每个连接各自一份空库
pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}
