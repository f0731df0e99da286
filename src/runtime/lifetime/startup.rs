use crate::errors::{EvaluationError, Result};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备运行命令所需的上下文
/// 包括 TLS 加密后端、存储连接和数据库迁移
pub async fn prepare_startup() -> Result<StartupContext> {
    // 可能已被其他组件安装，忽略重复安装
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage().await.map_err(|e| {
        EvaluationError::database_connection(format!("Failed to create storage backend: {e}"))
    })?;
    info!("Storage backend initialized and migrations completed");

    Ok(StartupContext { storage })
}
