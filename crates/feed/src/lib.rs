//! # `stockwatch-feed` - 外部数据源适配层
//!
//! - `finnhub`: 美股代码目录 (需要 API Key)
//! - `yahoo`: 即时报价与日线历史 (无需凭证)

pub mod finnhub;
pub mod yahoo;

use std::time::Duration;

/// 伪装浏览器的 User-Agent，减少被上游拦截的风险
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// # Summary
/// 构建带超时与默认 Header 的 reqwest 客户端。
///
/// # Logic
/// 1. 确保进程内已安装 rustls 加密提供者 (reqwest 未内置提供者，缺失时构建会 panic)。
/// 2. 设置超时与 User-Agent。
///
/// # Arguments
/// * `timeout`: 单次请求超时。
///
/// # Returns
/// 成功返回客户端，失败返回构建错误的描述。
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, String> {
    stockwatch_core::common::tls::install_crypto_provider();

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(BROWSER_USER_AGENT),
    );

    reqwest::Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}
