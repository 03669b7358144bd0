pub mod album;
pub mod db_data;
pub mod photo;
