use tracing::debug;

/// # Summary
/// 安装进程级 rustls 加密后端 (ring)。
///
/// # Logic
/// 1. 尝试将 ring 注册为默认 CryptoProvider。
/// 2. 已有其他组件安装过时保留现有后端，只记录调试日志。
///
/// # Returns
/// 本次调用完成安装返回 `true`。
pub fn install_crypto_provider() -> bool {
    match rustls::crypto::ring::default_provider().install_default() {
        Ok(()) => true,
        Err(_existing) => {
            debug!("rustls crypto provider already installed");
            false
        }
    }
}
