use thiserror::Error;

/// # Summary
/// 代码目录域错误枚举，覆盖配置缺失、上游不可用与响应解析失败。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 错误信息中不得包含 API Key 的取值。
#[derive(Error, Debug, Clone)]
pub enum DirectoryError {
    // 未配置 API Key，属于配置错误而非网络故障
    #[error("API key not configured")]
    MissingApiKey,
    // 上游返回非成功状态或网络层失败
    #[error("Upstream unavailable: {0}")]
    Upstream(String),
    // 上游响应无法解析
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DirectoryError {
    /// 是否为配置错误 (与网络故障区分)
    pub fn is_configuration(&self) -> bool {
        matches!(self, DirectoryError::MissingApiKey)
    }
}
