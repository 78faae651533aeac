use crate::common::{StockSymbol, normalize_ticker};
use crate::directory::error::DirectoryError;
use async_trait::async_trait;

/// # Summary
/// 代码目录接口，提供全部可交易美股代码及代码有效性校验。
///
/// # Invariants
/// - 每次 `list_all` 最多向上游发起一次请求，不做重试。
/// - 返回的记录 `symbol` 已大写，且 `symbol` 与 `name` 均非空。
#[async_trait]
pub trait SymbolDirectory: Send + Sync {
    /// # Summary
    /// 获取完整的代码目录。
    ///
    /// # Logic
    /// 1. 检查凭证配置。
    /// 2. 向上游发起单次请求并过滤、规范化结果。
    ///
    /// # Returns
    /// 成功返回代码记录列表 (保持上游顺序)，失败返回 `DirectoryError`。
    async fn list_all(&self) -> Result<Vec<StockSymbol>, DirectoryError>;

    /// # Summary
    /// 判断代码是否存在于目录中。
    ///
    /// # Logic
    /// 1. 规范化输入 (去空白、转大写)；空输入直接返回 false，不发起请求。
    /// 2. 调用 `list_all` 并检查成员关系。
    ///
    /// # Arguments
    /// * `ticker`: 用户输入的代码。
    ///
    /// # Returns
    /// 存在返回 true；上游失败时返回 `DirectoryError`。
    async fn validate(&self, ticker: &str) -> Result<bool, DirectoryError> {
        let Some(ticker) = normalize_ticker(ticker) else {
            return Ok(false);
        };
        let stocks = self.list_all().await?;
        Ok(stocks.iter().any(|s| s.symbol == ticker))
    }
}
