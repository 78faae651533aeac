use thiserror::Error;

/// # Summary
/// 详情获取错误。
///
/// # Invariants
/// - 对外只暴露 "无法获取该代码的数据"，不区分代码无效与上游故障；具体原因记录在日志中。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    #[error("error fetching data for {symbol}")]
    SymbolNotFoundOrUpstream { symbol: String },
}

impl DetailError {
    pub fn symbol(&self) -> &str {
        match self {
            DetailError::SymbolNotFoundOrUpstream { symbol } => symbol,
        }
    }
}
