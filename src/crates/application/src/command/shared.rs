use crate::error::AppError;

/// ID生成器接口，相册与照片的主键都由它分配
#[async_trait::async_trait]
pub trait IdGenerator: Send + Sync {
    /// 生成下一个唯一ID
    async fn next_id(&self) -> Result<i64, AppError>;
}
