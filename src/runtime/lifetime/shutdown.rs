use tokio::signal;
use tracing::{error, warn};

/// 等待 Ctrl+C，收到后返回
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        // 无法监听信号时永不返回，让命令正常执行完
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, cancelling the running command...");
}
