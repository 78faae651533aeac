use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use stockwatch_core::config::ProviderConfig;
use stockwatch_core::market::entity::{PricePoint, Quote};
use stockwatch_core::market::error::MarketError;
use stockwatch_core::market::port::QuoteProvider;
use tracing::debug;

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 报价与历史均取自 v8 chart 接口，无需凭证。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// API 根地址，例如 https://query1.finance.yahoo.com
    base_url: String,
}

impl YahooProvider {
    /// # Summary
    /// 根据数据源配置创建 YahooProvider。
    ///
    /// # Logic
    /// 1. 按配置的超时构建客户端 (默认 10 秒)。
    /// 2. 设置伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    ///
    /// # Arguments
    /// * `config`: 数据源配置。
    ///
    /// # Returns
    /// 返回初始化后的 YahooProvider。
    pub fn new(config: &ProviderConfig) -> Result<Self, MarketError> {
        let client = crate::build_client(Duration::from_secs(config.timeout_secs))
            .map_err(MarketError::Network)?;
        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Summary
    /// 请求 chart 接口并取出单个证券结果。
    ///
    /// # Logic
    /// 1. 代码作为单个路径段转义后拼入 URL，不能借 `?`、`#`、`/` 改写请求。
    /// 2. 发起请求；404 视为代码不存在，其余非成功状态视为网络错误。
    /// 3. 解析 JSON，若 chart.error 存在则返回错误。
    /// 4. 取出 result 列表中的结果，列表为空视为数据未找到。
    async fn fetch_chart(
        &self,
        symbol: &str,
        query: &[(&str, String)],
    ) -> Result<YahooResult, MarketError> {
        let url = chart_url(&self.base_url, symbol)?;

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(MarketError::NotFound);
        }
        if !resp.status().is_success() {
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        if let Some(err) = json.chart.error {
            return Err(MarketError::Unknown(err.description));
        }

        json.chart
            .result
            .ok_or(MarketError::NotFound)?
            .pop()
            .ok_or(MarketError::NotFound)
    }
}

/// 构建 `<base>/v8/finance/chart/<symbol>`，代码整体作为一个转义后的路径段
fn chart_url(base_url: &str, symbol: &str) -> Result<Url, MarketError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| MarketError::Network(format!("Invalid base url {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|()| MarketError::Network(format!("Invalid base url {}", base_url)))?
        .pop_if_empty()
        .extend(["v8", "finance", "chart", symbol]);
    Ok(url)
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    description: String,
}

/// # Summary
/// Yahoo API 单个证券结果。
#[derive(Deserialize, Debug)]
struct YahooResult {
    meta: YahooMeta,
    // 无成交日的区间可能不返回时间戳
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

/// # Summary
/// Yahoo API 证券元数据，承载即时报价字段。
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    symbol: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_volume: Option<u64>,
    fifty_two_week_low: Option<f64>,
    fifty_two_week_high: Option<f64>,
}

/// # Summary
/// Yahoo API 指标容器。
#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

/// # Summary
/// Yahoo API 原始报价数据 (只关心收盘价)。
#[derive(Deserialize, Debug)]
struct YahooQuote {
    /// 收盘价列表，停牌日为 null
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// # Summary
/// 将 chart 元数据转换为报价实体。
///
/// # Logic
/// 1. 缺少最新价视为数据不可用。
/// 2. 展示名称依次取 longName、shortName，最后回退为代码。
/// 3. 涨跌额与涨跌幅相对前收盘价计算；前收盘价缺失或为 0 时留空。
fn quote_from_meta(requested: &str, meta: YahooMeta) -> Result<Quote, MarketError> {
    let price = meta
        .regular_market_price
        .ok_or_else(|| MarketError::Parse("No regularMarketPrice".into()))?;
    let symbol = meta.symbol.unwrap_or_else(|| requested.to_string());
    let display_name = meta
        .long_name
        .or(meta.short_name)
        .unwrap_or_else(|| symbol.clone());

    let previous = meta
        .previous_close
        .or(meta.chart_previous_close)
        .filter(|p| *p != 0.0);
    let change_absolute = previous.map(|p| price - p);
    let change_percent = previous.map(|p| (price - p) / p * 100.0);

    Ok(Quote {
        symbol,
        display_name,
        price,
        change_absolute,
        change_percent,
        volume: meta.regular_market_volume,
        week52_low: meta.fifty_two_week_low,
        week52_high: meta.fifty_two_week_high,
    })
}

/// # Summary
/// 将时间戳序列与收盘价序列拼接为价格点。
///
/// # Logic
/// 1. 按下标对齐 timestamp 与 close。
/// 2. 跳过收盘价为 null 或时间戳非法的条目。
/// 3. 保持数据源顺序。
fn points_from_result(result: YahooResult) -> Result<Vec<PricePoint>, MarketError> {
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or(MarketError::Parse("No quote data".into()))?;

    Ok(result
        .timestamp
        .iter()
        .zip(quote.close.iter())
        .filter_map(|(ts, close)| {
            let close = (*close)?;
            let time = DateTime::<Utc>::from_timestamp(*ts, 0)?;
            Some(PricePoint {
                date: time.date_naive(),
                close_price: close,
            })
        })
        .collect())
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    /// # Summary
    /// 获取即时报价。
    ///
    /// # Logic
    /// 1. 以 `range=1d&interval=1d` 请求 chart 接口。
    /// 2. 从 meta 中提取报价字段。
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketError> {
        let result = self
            .fetch_chart(
                symbol,
                &[("range", "1d".to_string()), ("interval", "1d".to_string())],
            )
            .await?;
        let quote = quote_from_meta(symbol, result.meta)?;
        debug!("Yahoo quote for {}: {}", symbol, quote.price);
        Ok(quote)
    }

    /// # Summary
    /// 从 Yahoo Finance 抓取日线收盘价历史。
    ///
    /// # Logic
    /// 1. 构建包含 period1, period2 的 API URL，周期固定为 1d。
    /// 2. 发起异步请求并解析嵌套的 JSON 数据。
    /// 3. 过滤空收盘价，保持原始顺序。
    async fn fetch_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, MarketError> {
        let result = self
            .fetch_chart(
                symbol,
                &[
                    ("period1", start.timestamp().to_string()),
                    ("period2", end.timestamp().to_string()),
                    ("interval", "1d".to_string()),
                ],
            )
            .await?;
        let points = points_from_result(result)?;
        debug!("Yahoo history for {}: {} points", symbol, points.len());
        Ok(points)
    }
}
