use crate::{consts, view};
use actix_files::Files;
use actix_web::{http::header::ContentType, web, HttpResponse};
use std::path::Path;

async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(view::home_page())
}

/// 首页与照片目录的静态文件服务，照片通过 /photos/{file} 访问
pub fn configure_service(cfg: &mut web::ServiceConfig, photos_dir: &Path) {
    if !photos_dir.is_dir() {
        log::warn!(
            "Photo directory '{}' not found, uploaded photos will not be served until it exists",
            photos_dir.display()
        );
    }

    cfg.route(consts::URL_PATH_HOME, web::get().to(home))
        .service(Files::new(consts::URL_PATH_PHOTOS, photos_dir));
}
