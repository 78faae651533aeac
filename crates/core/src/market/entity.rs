use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// 单个证券的即时报价。
///
/// # Invariants
/// - `price` 为最新成交价；其余统计字段在数据源缺失时为 None。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    // 股票代码
    pub symbol: String,
    // 展示名称 (数据源未提供时回退为代码本身)
    pub display_name: String,
    // 最新价
    pub price: f64,
    // 相对前收盘价的涨跌额
    pub change_absolute: Option<f64>,
    // 相对前收盘价的涨跌幅 (百分比)
    pub change_percent: Option<f64>,
    // 当日成交量
    pub volume: Option<u64>,
    // 52 周最低价
    pub week52_low: Option<f64>,
    // 52 周最高价
    pub week52_high: Option<f64>,
}

/// # Summary
/// 历史价格序列中的一个日线收盘点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    // 交易日
    pub date: NaiveDate,
    // 收盘价
    pub close_price: f64,
}

/// # Summary
/// 详情页展示用的行情快照：即时报价加最近一段日线历史。
///
/// # Invariants
/// - `history` 保持数据源的原始顺序，不做重排。
/// - 每次查看详情时重新获取，不缓存、不持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    #[serde(flatten)]
    pub quote: Quote,
    pub history: Vec<PricePoint>,
}
