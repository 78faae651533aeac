use crate::error::DetailError;
use chrono::Duration;
use std::sync::Arc;
use stockwatch_core::common::normalize_ticker;
use stockwatch_core::common::time::TimeProvider;
use stockwatch_core::market::entity::QuoteSnapshot;
use stockwatch_core::market::port::QuoteProvider;
use tracing::{debug, warn};

/// 详情页历史窗口 (天)
pub const HISTORY_WINDOW_DAYS: i64 = 7;

/// # Summary
/// 单只股票详情获取器。
///
/// # Invariants
/// - 每次调用恰好发起一次报价请求与一次历史请求，不缓存、不重试。
/// - 历史窗口为 `[now − 7 天, now]`，`now` 取自注入的时钟。
#[derive(Clone)]
pub struct QuoteDetailFetcher {
    // 行情数据源
    provider: Arc<dyn QuoteProvider>,
    // 时钟，测试时可替换为虚拟时钟
    clock: Arc<dyn TimeProvider>,
}

impl QuoteDetailFetcher {
    pub fn new(provider: Arc<dyn QuoteProvider>, clock: Arc<dyn TimeProvider>) -> Self {
        Self { provider, clock }
    }

    /// # Summary
    /// 获取指定代码的行情快照。
    ///
    /// # Logic
    /// 1. 规范化代码 (去空白、转大写)；为空时直接报错，不发起请求。
    /// 2. 以注入时钟计算 7 天窗口。
    /// 3. 并发请求即时报价与日线历史。
    /// 4. 任一失败都记录原因并映射为 `SymbolNotFoundOrUpstream`。
    ///
    /// # Arguments
    /// * `symbol`: 用户输入或路由中的股票代码。
    ///
    /// # Returns
    /// 成功返回报价与历史 (保持数据源顺序)。
    pub async fn fetch(&self, symbol: &str) -> Result<QuoteSnapshot, DetailError> {
        let Some(symbol) = normalize_ticker(symbol) else {
            return Err(DetailError::SymbolNotFoundOrUpstream {
                symbol: symbol.trim().to_string(),
            });
        };

        let end = self.clock.now();
        let start = end - Duration::days(HISTORY_WINDOW_DAYS);
        debug!("Fetching detail for {} ({} .. {})", symbol, start, end);

        let (quote, history) = tokio::join!(
            self.provider.fetch_quote(&symbol),
            self.provider.fetch_history(&symbol, start, end)
        );

        match (quote, history) {
            (Ok(quote), Ok(history)) => Ok(QuoteSnapshot { quote, history }),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to fetch detail for {}: {}", symbol, e);
                Err(DetailError::SymbolNotFoundOrUpstream { symbol })
            }
        }
    }
}
