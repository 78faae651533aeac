use stockwatch_core::directory::error::DirectoryError;
use stockwatch_core::store::error::StoreError;
use thiserror::Error;

/// 客户端错误，按类别映射到进程退出码
#[derive(Debug, Error)]
pub enum ClientError {
    // 用户输入不合法
    #[error("{0}")]
    Usage(String),

    #[error("Ticker {0} is invalid")]
    InvalidTicker(String),

    // 无法连接服务端或请求超时
    #[error("request failed: {0}")]
    Http(String),

    // 服务端返回了错误响应，message 为服务端给出的说明
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    // 代码校验请求本身失败 (不同于代码无效)
    #[error("could not validate ticker: {0}")]
    Validation(DirectoryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) | Self::InvalidTicker(_) => 2,
            Self::Http(_) | Self::Server { .. } | Self::Decode(_) | Self::Validation(_) => 3,
            Self::Store(_) | Self::Io(_) => 10,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}
