pub const URL_PATH_HOME: &str = "/";
pub const URL_PATH_ALBUM: &str = "/album";
pub const URL_PATH_ALBUM_LIST: &str = "/album/list";
pub const URL_PATH_ALBUM_CREATE: &str = "/album/create";
pub const URL_PATH_PHOTO_ADD: &str = "/album/photo-add";
pub const URL_PATH_PHOTO_ALL: &str = "/album/photo-all";
pub const URL_PATH_ALBUM_DELETE: &str = "/album/delete";
pub const URL_PATH_PHOTOS: &str = "/photos";

pub const MAIN_PHOTO_REQUIRED: &str = "Main photo album is needed.";
pub const PHOTO_REQUIRED: &str = "Photo is needed.";
