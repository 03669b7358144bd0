//! 页面渲染，直接拼接 HTML

use crate::consts;
use application::dto::{AlbumDto, PhotoDto};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// URL 路径段中需要编码的字符
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTML 转义
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav>
<a href="{home}">Home</a> |
<a href="{list}">Albums</a> |
<a href="{create}">New album</a>
</nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        home = consts::URL_PATH_HOME,
        list = consts::URL_PATH_ALBUM_LIST,
        create = consts::URL_PATH_ALBUM_CREATE,
        body = body,
    )
}

fn message_block(message: Option<&str>) -> String {
    match message {
        Some(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
        None => String::new(),
    }
}

fn photo_url(photo: &PhotoDto) -> String {
    format!(
        "{}/{}",
        consts::URL_PATH_PHOTOS,
        utf8_percent_encode(&photo.file_name, PATH_SEGMENT)
    )
}

pub fn home_page() -> String {
    let body = format!(
        r#"<p>Welcome to the photo albums.</p>
<ul>
<li><a href="{}">Browse albums</a></li>
<li><a href="{}">Create a new album</a></li>
</ul>"#,
        consts::URL_PATH_ALBUM_LIST,
        consts::URL_PATH_ALBUM_CREATE
    );
    layout("Photo albums", &body)
}

/// 新建相册表单，`title` 为上次提交的标题
pub fn create_album_page(title: &str, message: Option<&str>) -> String {
    let body = format!(
        r#"{message}
<form method="post" action="{action}" enctype="multipart/form-data">
<label>Title <input type="text" name="title" value="{title}"></label>
<label>Main photo <input type="file" name="imageFile" accept="image/*"></label>
<button type="submit">Create</button>
</form>"#,
        message = message_block(message),
        action = consts::URL_PATH_ALBUM_CREATE,
        title = escape(title),
    );
    layout("Create album", &body)
}

pub fn add_photo_page(album_id: i64, message: Option<&str>) -> String {
    let body = format!(
        r#"{message}
<form method="post" action="{action}" enctype="multipart/form-data">
<input type="hidden" name="albumId" value="{album_id}">
<label>Photo <input type="file" name="imageFile" accept="image/*"></label>
<button type="submit">Add</button>
</form>"#,
        message = message_block(message),
        action = consts::URL_PATH_PHOTO_ADD,
        album_id = album_id,
    );
    layout("Add photo", &body)
}

pub fn album_list_page(albums: &[AlbumDto]) -> String {
    let mut body = String::new();
    if albums.is_empty() {
        body.push_str("<p>No albums yet.</p>");
    } else {
        body.push_str("<table>\n<tr><th>Cover</th><th>Title</th><th>Photos</th><th></th></tr>\n");
        for album in albums {
            let id = album.id.unwrap_or_default();
            let cover = album
                .main_photo
                .as_ref()
                .map(|p| format!(r#"<img src="{}" alt="" width="120">"#, photo_url(p)))
                .unwrap_or_default();
            body.push_str(&format!(
                r#"<tr><td>{cover}</td><td>{title}</td><td>{count}</td><td><a href="{all}/{id}">Show photos</a> <a href="{add}/{id}">Add photo</a> <a href="{delete}/{id}">Delete</a></td></tr>"#,
                cover = cover,
                title = escape(&album.title),
                count = album.photos.len(),
                all = consts::URL_PATH_PHOTO_ALL,
                add = consts::URL_PATH_PHOTO_ADD,
                delete = consts::URL_PATH_ALBUM_DELETE,
                id = id,
            ));
            body.push('\n');
        }
        body.push_str("</table>");
    }
    layout("Albums", &body)
}

/// 相册的附加照片列表
pub fn photo_list_page(album: &AlbumDto) -> String {
    let mut body = String::new();
    if album.photos.is_empty() {
        body.push_str("<p>This album has no photos yet.</p>");
    } else {
        body.push_str("<ul>\n");
        for photo in &album.photos {
            body.push_str(&format!(
                r#"<li><img src="{}" alt="{}" width="320"></li>"#,
                photo_url(photo),
                escape(&photo.file_name)
            ));
            body.push('\n');
        }
        body.push_str("</ul>");
    }
    body.push_str(&format!(
        r#"<p><a href="{}/{}">Add photo</a></p>"#,
        consts::URL_PATH_PHOTO_ADD,
        album.id.unwrap_or_default()
    ));
    layout(&album.title, &body)
}
