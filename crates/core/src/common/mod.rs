use serde::{Deserialize, Serialize};

pub mod time;
pub mod tls;

/// # Summary
/// 证券代码记录，代表代码目录中的一个可交易标的。
///
/// # Invariants
/// - `symbol` 为大写的交易代码，在目录内唯一，作为记录的身份标识。
/// - 由代码目录网关产出后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockSymbol {
    // 股票代码 (例如: AAPL, BRK.B)
    pub symbol: String,
    // 公司名称或展示名称
    pub name: String,
}

impl StockSymbol {
    /// 以任意字符串构造记录
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// # Summary
/// 规范化用户输入的股票代码。
///
/// # Logic
/// 1. 去除首尾空白。
/// 2. 转换为大写。
///
/// # Arguments
/// * `raw`: 原始输入。
///
/// # Returns
/// 规范化后的代码；输入全为空白时返回 None。
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
