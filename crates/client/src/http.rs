use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use stockwatch_api::types::{
    ApiErrorResponse, ApiResponse, QuoteSnapshotResponse, StockResponse, ValidResponse,
};
use stockwatch_core::common::{StockSymbol, normalize_ticker};
use stockwatch_core::directory::error::DirectoryError;
use stockwatch_core::directory::port::SymbolDirectory;
use tracing::debug;

use crate::error::ClientError;

/// # Summary
/// stockwatch 服务端的 HTTP 客户端。
///
/// # Invariants
/// - 每次调用对应一次请求，不重试；超时是唯一的时间上限。
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        stockwatch_core::common::tls::install_crypto_provider();
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Summary
    /// 拼接接口地址，每个路径段单独转义。
    ///
    /// # Invariants
    /// - 代码中的 `/`、`?`、`#` 只会落在同一个路径段内，不会改变请求的路径或查询串。
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Usage(format!("invalid server url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Usage(format!("invalid server url {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 获取全部股票代码
    pub async fn list_stocks(&self) -> Result<Vec<StockSymbol>, ClientError> {
        let resp = self
            .client
            .get(self.endpoint(&["api", "stocks"])?)
            .send()
            .await?;
        let stocks: Vec<StockResponse> = decode(resp).await?;
        Ok(stocks
            .into_iter()
            .map(|s| StockSymbol::new(s.symbol, s.name))
            .collect())
    }

    /// 向服务端校验股票代码
    pub async fn validate(&self, ticker: &str) -> Result<bool, ClientError> {
        let resp = self
            .client
            .get(self.endpoint(&["api", "stocks"])?)
            .query(&[("ticker", ticker)])
            .send()
            .await?;
        let body: ValidResponse = decode(resp).await?;
        Ok(body.valid)
    }

    /// 获取单只股票的行情快照
    pub async fn quote(&self, symbol: &str) -> Result<QuoteSnapshotResponse, ClientError> {
        let resp = self
            .client
            .get(self.endpoint(&["api", "stocks", symbol, "quote"])?)
            .send()
            .await?;
        let body: ApiResponse<QuoteSnapshotResponse> = decode(resp).await?;
        body.data
            .ok_or_else(|| ClientError::Decode("missing data in quote response".to_string()))
    }
}

/// # Summary
/// 解析响应体。
///
/// # Logic
/// 1. 成功状态按目标类型解析。
/// 2. 失败状态尽量读取服务端的 `error` 字段，读不到时使用状态码描述。
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let message = match resp.json::<ApiErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", status),
    };
    debug!("Server responded {}: {}", status, message);
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

/// # Summary
/// 经由 stockwatch 服务端访问的代码目录，供浏览器加载完整列表、自选股校验代码。
pub struct HttpDirectory {
    api: ApiClient,
}

impl HttpDirectory {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn to_directory_error(err: ClientError) -> DirectoryError {
    match err {
        ClientError::Decode(msg) => DirectoryError::Parse(msg),
        other => DirectoryError::Upstream(other.to_string()),
    }
}

#[async_trait]
impl SymbolDirectory for HttpDirectory {
    async fn list_all(&self) -> Result<Vec<StockSymbol>, DirectoryError> {
        self.api.list_stocks().await.map_err(to_directory_error)
    }

    /// 使用服务端的 `?ticker=` 查询，而非下载完整列表
    async fn validate(&self, ticker: &str) -> Result<bool, DirectoryError> {
        let Some(ticker) = normalize_ticker(ticker) else {
            return Ok(false);
        };
        self.api.validate(&ticker).await.map_err(to_directory_error)
    }
}
