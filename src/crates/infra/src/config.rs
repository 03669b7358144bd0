use config::{Config, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::sync::RwLock;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    /// 照片存放目录
    photos_dir: String,
    /// 启动时自动执行数据库迁移
    auto_migrate: bool,
    /// 单次上传大小上限（字节）
    upload_limit_bytes: u64,
    /// 数据库连接池配置
    database: RawDatabaseConfig,
    /// 服务器配置
    server: RawServerConfig,
}

/// 数据库连接池配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawDatabaseConfig {
    max_connections: u32,
    min_connections: u32,
}

impl Default for RawDatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 2,
        }
    }
}

/// 服务器配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawServerConfig {
    /// 监听地址
    host: String,
    /// 监听端口
    port: u16,
}

impl Default for RawServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "".to_string(),
            photos_dir: "./static/photos/".to_string(),
            auto_migrate: true,
            upload_limit_bytes: 20 * 1024 * 1024, // 20MB
            database: RawDatabaseConfig::default(),
            server: RawServerConfig::default(),
        }
    }
}

/// 数据库连接池配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub min_connections: u32,
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    pub database_url: Arc<RwLock<String>>,
    pub photos_dir: Arc<RwLock<String>>,
    pub auto_migrate: Arc<AtomicBool>,
    pub upload_limit_bytes: Arc<AtomicU64>,
    pub database: Arc<RwLock<DatabaseConfig>>,
    pub server: Arc<RwLock<ServerConfig>>,
}

impl Default for AppConfigImpl {
    fn default() -> Self {
        AppConfigImpl::new(RawConfig::default())
    }
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Self {
        let database_config = DatabaseConfig {
            max_connections: data.database.max_connections,
            min_connections: data.database.min_connections,
        };
        let server_config = ServerConfig {
            host: data.server.host,
            port: data.server.port,
        };
        AppConfigImpl {
            database_url: Arc::new(RwLock::new(data.database_url)),
            photos_dir: Arc::new(RwLock::new(data.photos_dir)),
            auto_migrate: Arc::new(AtomicBool::new(data.auto_migrate)),
            upload_limit_bytes: Arc::new(AtomicU64::new(data.upload_limit_bytes)),
            database: Arc::new(RwLock::new(database_config)),
            server: Arc::new(RwLock::new(server_config)),
        }
    }

    pub fn load() -> Result<AppConfigImpl, Box<dyn Error>> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<AppConfigImpl, Box<dyn Error>> {
        let raw: RawConfig = config.try_deserialize()?; // serde 自动填充默认值
        Ok(AppConfigImpl::new(raw))
    }

    pub fn database_url(&self) -> String {
        let cfg_val = self.database_url.read().unwrap();
        (*cfg_val).clone()
    }

    pub fn photos_dir(&self) -> String {
        let cfg_val = self.photos_dir.read().unwrap();
        (*cfg_val).clone()
    }

    pub fn set_photos_dir(&self, dir: &str) {
        let mut cfg_val = self.photos_dir.write().unwrap();
        *cfg_val = dir.to_string();
    }

    /// 照片目录，用于静态文件服务
    pub fn photos_path(&self) -> PathBuf {
        PathBuf::from(self.photos_dir())
    }

    pub fn auto_migrate(&self) -> bool {
        self.auto_migrate.load(Ordering::SeqCst)
    }

    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_bytes.load(Ordering::SeqCst) as usize
    }

    pub fn database(&self) -> DatabaseConfig {
        let cfg_val = self.database.read().unwrap();
        cfg_val.clone()
    }

    pub fn server(&self) -> ServerConfig {
        let cfg_val = self.server.read().unwrap();
        cfg_val.clone()
    }
}
