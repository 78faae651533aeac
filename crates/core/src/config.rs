use serde::{Deserialize, Serialize};

/// 全局应用配置
///
/// 每个字段都有默认值，配置文件或环境变量只需覆盖需要修改的部分。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub browser: BrowserConfig,
    pub storage: StorageConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 外部数据源配置
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    // Finnhub 代码目录 API Key，缺失时目录请求以配置错误失败
    pub finnhub_api_key: Option<String>,
    pub finnhub_base_url: String,
    pub yahoo_base_url: String,
    // 单次 HTTP 请求超时 (秒)
    pub timeout_secs: u64,
}

/// 股票列表浏览器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    // 每页展示的记录数
    pub page_size: usize,
    // 页码按钮滑动窗口的最大宽度
    pub page_window: usize,
}

/// 客户端本地存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    // 自选股列表所在的存储槽名称
    pub watchlist_slot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
}

impl ProviderConfig {
    /// 返回非空白的 API Key
    pub fn api_key(&self) -> Option<&str> {
        self.finnhub_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

// API Key 不得出现在日志中
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field(
                "finnhub_api_key",
                &self.api_key().map(|_| "<redacted>"),
            )
            .field("finnhub_base_url", &self.finnhub_base_url)
            .field("yahoo_base_url", &self.yahoo_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            finnhub_api_key: None,
            finnhub_base_url: "https://finnhub.io/api/v1".to_string(),
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: 21,
            page_window: 7,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            watchlist_slot: "watchlist".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}
