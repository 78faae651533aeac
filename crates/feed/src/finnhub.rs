use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use stockwatch_core::common::StockSymbol;
use stockwatch_core::config::ProviderConfig;
use stockwatch_core::directory::error::DirectoryError;
use stockwatch_core::directory::port::SymbolDirectory;
use tracing::debug;

/// 查询的交易所代码 (全部美股)
const US_EXCHANGE: &str = "US";

/// # Summary
/// Finnhub 代码目录网关实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - API Key 仅作为查询参数发送，不会出现在日志或错误信息中。
#[derive(Clone)]
pub struct FinnhubDirectory {
    // 内部使用的 HTTP 客户端
    client: Client,
    // API 根地址，例如 https://finnhub.io/api/v1
    base_url: String,
    // 已去除空白的 API Key，缺失时为 None
    api_key: Option<String>,
}

/// # Summary
/// Finnhub `/stock/symbol` 接口返回的单条记录。
///
/// # Invariants
/// - 上游字段可能缺失或为空字符串，需在转换时过滤。
/// - `displaySymbol`、`type` 等其余字段不参与转换，反序列化时忽略。
#[derive(Deserialize, Debug)]
struct FinnhubSymbol {
    symbol: Option<String>,
    description: Option<String>,
}

impl FinnhubDirectory {
    /// # Summary
    /// 根据数据源配置创建 FinnhubDirectory。
    ///
    /// # Logic
    /// 1. 按配置的超时构建 HTTP 客户端。
    /// 2. 记录 API Key；Key 缺失不会在此处报错，而是在每次请求时报告配置错误。
    ///
    /// # Arguments
    /// * `config`: 数据源配置。
    ///
    /// # Returns
    /// 返回初始化后的 FinnhubDirectory。
    pub fn new(config: &ProviderConfig) -> Result<Self, DirectoryError> {
        let client = crate::build_client(Duration::from_secs(config.timeout_secs))
            .map_err(DirectoryError::Upstream)?;
        Ok(Self {
            client,
            base_url: config.finnhub_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().map(str::to_string),
        })
    }
}

/// # Summary
/// 将上游记录规范化为 `StockSymbol`。
///
/// # Logic
/// 1. 丢弃缺少代码或描述的条目。
/// 2. 代码转大写，描述作为名称。
/// 3. 保持上游顺序。
fn normalize(raw: Vec<FinnhubSymbol>) -> Vec<StockSymbol> {
    raw.into_iter()
        .filter_map(|s| match (s.symbol, s.description) {
            (Some(symbol), Some(description))
                if !symbol.trim().is_empty() && !description.trim().is_empty() =>
            {
                Some(StockSymbol::new(symbol.trim().to_uppercase(), description))
            }
            _ => None,
        })
        .collect()
}

#[async_trait]
impl SymbolDirectory for FinnhubDirectory {
    /// # Summary
    /// 从 Finnhub 拉取全部美股代码。
    ///
    /// # Logic
    /// 1. 检查 API Key，缺失则直接返回配置错误，不发起请求。
    /// 2. 请求 `/stock/symbol?exchange=US&token=...`。
    /// 3. 非成功状态返回 Upstream 错误；响应无法解析返回 Parse 错误。
    /// 4. 过滤并规范化记录。
    ///
    /// # Returns
    /// 成功返回代码列表，失败返回 DirectoryError。
    async fn list_all(&self) -> Result<Vec<StockSymbol>, DirectoryError> {
        let api_key = self.api_key.as_deref().ok_or(DirectoryError::MissingApiKey)?;
        let url = format!("{}/stock/symbol", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("exchange", US_EXCHANGE), ("token", api_key)])
            .send()
            .await
            // 去掉 URL，避免查询参数中的 token 进入错误信息
            .map_err(|e| DirectoryError::Upstream(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(DirectoryError::Upstream(format!("HTTP {}", resp.status())));
        }

        let raw: Vec<FinnhubSymbol> = resp
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.without_url().to_string()))?;

        let total = raw.len();
        let stocks = normalize(raw);
        debug!(
            "Finnhub directory returned {} records, {} usable",
            total,
            stocks.len()
        );
        Ok(stocks)
    }
}
