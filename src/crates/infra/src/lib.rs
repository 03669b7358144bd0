pub mod config;
pub use config::{AppConfigImpl, DatabaseConfig, ServerConfig};

pub mod id_generator;
pub use id_generator::SnowflakeIdGenerator;

pub mod repository;
pub use repository::postgres::command::album::AlbumRepositoryImpl;
pub use repository::postgres::command::photo::PhotoRepositoryImpl;

pub mod storage;
pub use storage::LocalPhotoFileStore;

#[cfg(test)]
mod test_db;
