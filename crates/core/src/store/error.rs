use thiserror::Error;

/// # Summary
/// 客户端本地存储错误枚举，处理读写失败与序列化问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum StoreError {
    // 数据序列化失败
    #[error("Serialize error: {0}")]
    Serialize(String),
    // 数据反序列化失败
    #[error("Deserialize error: {0}")]
    Deserialize(String),
    // 底层存储介质故障
    #[error("Storage error: {0}")]
    Storage(String),
    // 初始化存储失败
    #[error("Initialization error: {0}")]
    InitError(String),
}
