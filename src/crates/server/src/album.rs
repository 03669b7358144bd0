use super::consts;
use super::view;
use super::AppState;
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{
    http::header::ContentType, http::StatusCode, web, web::Path, HttpResponse,
};
use application::command::photo::UploadedPhoto;
use application::dto::AlbumDto;
use application::error::AppError;
use log::{error, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Application(#[from] AppError),
    #[error("{0}")]
    Upload(String),
}

impl actix_web::error::ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Application(AppError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).body(message)
    }
}

#[derive(MultipartForm)]
pub struct CreateAlbumForm {
    title: Option<Text<String>>,
    #[multipart(rename = "imageFile")]
    image_file: Option<TempFile>,
}

#[derive(MultipartForm)]
pub struct AddPhotoForm {
    #[multipart(rename = "albumId")]
    album_id: Text<i64>,
    #[multipart(rename = "imageFile")]
    image_file: Option<TempFile>,
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// 读取上传文件，没有选文件或文件为空时返回 None
async fn read_upload(file: Option<TempFile>) -> Result<Option<UploadedPhoto>, PageError> {
    let Some(file) = file else {
        return Ok(None);
    };
    let file_name = file.file_name.clone().unwrap_or_default();
    if file.size == 0 || file_name.is_empty() {
        return Ok(None);
    }

    let data = tokio::fs::read(file.file.path())
        .await
        .map_err(|e| PageError::Upload(format!("Reading upload {} failed: {}", file_name, e)))?;
    Ok(Some(UploadedPhoto::new(&file_name, data)))
}

async fn create_album_form() -> HttpResponse {
    html(view::create_album_page("", None))
}

async fn create_album(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<CreateAlbumForm>,
) -> Result<HttpResponse, PageError> {
    let title = form.title.map(|t| t.into_inner()).unwrap_or_default();
    let album_dto = AlbumDto::new(&title);
    if let Err(AppError::InvalidInput(msg)) = album_dto.validate() {
        return Ok(html(view::create_album_page(&title, Some(&msg))));
    }

    let Some(upload) = read_upload(form.image_file).await? else {
        return Ok(html(view::create_album_page(
            &title,
            Some(consts::MAIN_PHOTO_REQUIRED),
        )));
    };

    let photos_dir = state.app_cfg.photos_dir();
    let photo_service = state.photo_service();
    let album_service = state.album_service();
    let created = async {
        let main_photo = photo_service
            .create_photo_entity(&upload, &photos_dir)
            .await?;
        album_service.create_album_entity(album_dto, main_photo).await
    }
    .await;

    match created {
        Ok(album) => {
            info!(
                "Album '{}' created with id {}",
                album.title,
                album.id.unwrap_or_default()
            );
            Ok(see_other(consts::URL_PATH_HOME))
        }
        Err(e) => {
            error!("Failed to create album '{}': {}", title, e);
            let message = format!("Album could not be created: {}", e);
            Ok(html(view::create_album_page(&title, Some(&message))))
        }
    }
}

async fn add_photo_form(path: Path<i64>) -> HttpResponse {
    html(view::add_photo_page(path.into_inner(), None))
}

async fn add_photo(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<AddPhotoForm>,
) -> Result<HttpResponse, PageError> {
    let album_id = form.album_id.into_inner();
    let Some(upload) = read_upload(form.image_file).await? else {
        return Ok(html(view::add_photo_page(
            album_id,
            Some(consts::PHOTO_REQUIRED),
        )));
    };

    let album_service = state.album_service();
    // 相册不存在时不写文件
    album_service.get_by_id(album_id).await?;

    let photo = state
        .photo_service()
        .create_photo_entity(&upload, &state.app_cfg.photos_dir())
        .await?;
    album_service.add_photo(album_id, photo).await?;

    Ok(see_other(consts::URL_PATH_ALBUM_LIST))
}

async fn album_photos(
    state: web::Data<AppState>,
    path: Path<i64>,
) -> Result<HttpResponse, PageError> {
    let album = state.album_service().get_by_id(path.into_inner()).await?;
    Ok(html(view::photo_list_page(&album)))
}

async fn list_albums(state: web::Data<AppState>) -> Result<HttpResponse, PageError> {
    let albums = state.album_service().list_all().await?;
    Ok(html(view::album_list_page(&albums)))
}

async fn delete_album(
    state: web::Data<AppState>,
    path: Path<i64>,
) -> Result<HttpResponse, PageError> {
    let album_id = path.into_inner();
    state.album_service().delete_album(album_id).await?;
    info!("Album {} deleted", album_id);
    Ok(see_other(consts::URL_PATH_HOME))
}

pub fn configure_service(svc: &mut web::ServiceConfig) {
    svc.service(
        web::scope(consts::URL_PATH_ALBUM)
            .service(
                web::resource("/create")
                    .route(web::get().to(create_album_form))
                    .route(web::post().to(create_album)),
            )
            .route("/photo-add/{album_id}", web::get().to(add_photo_form))
            .route("/photo-add", web::post().to(add_photo))
            .route("/photo-all/{album_id}", web::get().to(album_photos))
            .route("/list", web::get().to(list_albums))
            .route("/delete/{id}", web::get().to(delete_album)),
    );
}
