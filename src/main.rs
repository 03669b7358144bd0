use actix_multipart::form::MultipartFormConfig;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use infra::config::AppConfigImpl;
use log::{error, info};
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use migration::{Migrator, MigratorTrait};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 配置日志同时输出到控制台和文件
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // 创建文件 appender
    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {m}{n}",
        )))
        .build("app.log")
        .unwrap();

    // 配置 log4rs：同时输出到控制台和文件
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .appender(Appender::builder().build(
            "stdout",
            Box::new(log4rs::append::console::ConsoleAppender::builder().build()),
        ))
        .build(
            Root::builder()
                .appender("file")
                .appender("stdout")
                .build(log_level.parse().unwrap_or(log::LevelFilter::Info)),
        )
        .unwrap();

    log4rs::init_config(config).unwrap();
    let cfg = AppConfigImpl::load().unwrap();
    let server_cfg = cfg.server();
    let db = server::AppState::init_db(&cfg.database_url(), &cfg.database())
        .await
        .expect("Failed to connect to database");

    if cfg.auto_migrate() {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run database migrations");
        info!("Database migrations applied");
    }

    let photos_dir = cfg.photos_path();
    if let Err(e) = std::fs::create_dir_all(&photos_dir) {
        error!(
            "Failed to create photo directory {}: {}",
            photos_dir.display(),
            e
        );
    }

    let upload_limit = cfg.upload_limit_bytes();
    let app_state = server::AppState::new(db, cfg).expect("Failed to create application state");
    let app_state = web::Data::new(app_state);

    info!(
        "Listening on {}:{}, photos stored in {}",
        server_cfg.host,
        server_cfg.port,
        photos_dir.display()
    );
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(MultipartFormConfig::default().total_limit(upload_limit))
            .wrap(Logger::default())
            .configure(server::album::configure_service)
            .configure(|svc| server::resources::configure_service(svc, &photos_dir))
    })
    .bind((server_cfg.host.as_str(), server_cfg.port))?
    .run()
    .await
}
