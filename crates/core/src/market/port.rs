use crate::market::entity::{PricePoint, Quote};
use crate::market::error::MarketError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// # Summary
/// 行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 每个方法对应上游的一次请求，不做重试。
/// - 不要求任何凭证。
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// # Summary
    /// 获取证券的即时报价。
    ///
    /// # Arguments
    /// * `symbol`: 已规范化的股票代码。
    ///
    /// # Returns
    /// 成功返回报价，失败返回 MarketError。
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketError>;

    /// # Summary
    /// 获取指定时间范围内的日线收盘价序列。
    ///
    /// # Logic
    /// 1. 构建日线周期的数据源请求。
    /// 2. 执行网络请求并解析响应，保持数据源顺序。
    ///
    /// # Arguments
    /// * `symbol`: 已规范化的股票代码。
    /// * `start`: 开始时间。
    /// * `end`: 结束时间。
    ///
    /// # Returns
    /// 成功返回价格点列表。
    async fn fetch_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, MarketError>;
}
