use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use stockwatch_api::server::{AppState, build_router};
use stockwatch_api::types::{
    ApiErrorResponse, ApiResponse, BrowsePageResponse, QuoteSnapshotResponse, StockResponse,
    ValidResponse,
};
use stockwatch_core::common::StockSymbol;
use stockwatch_core::common::time::FakeClockProvider;
use stockwatch_core::config::AppConfig;
use stockwatch_core::directory::error::DirectoryError;
use stockwatch_core::directory::port::SymbolDirectory;
use stockwatch_core::market::entity::{PricePoint, Quote};
use stockwatch_core::market::error::MarketError;
use stockwatch_core::market::port::QuoteProvider;
use stockwatch_market::QuoteDetailFetcher;
use tokio::net::TcpListener;

/// 模拟代码目录：可返回固定列表、配置错误或上游 500
enum DirectoryMode {
    Listing(Vec<StockSymbol>),
    MissingKey,
    Upstream500,
}

struct MockDirectory {
    mode: DirectoryMode,
    calls: AtomicUsize,
}

#[async_trait]
impl SymbolDirectory for MockDirectory {
    async fn list_all(&self) -> Result<Vec<StockSymbol>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            DirectoryMode::Listing(list) => Ok(list.clone()),
            DirectoryMode::MissingKey => Err(DirectoryError::MissingApiKey),
            DirectoryMode::Upstream500 => Err(DirectoryError::Upstream(
                "HTTP 500 Internal Server Error".to_string(),
            )),
        }
    }
}

/// 模拟行情数据源：只认识 AAPL
struct MockProvider;

#[async_trait]
impl QuoteProvider for MockProvider {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketError> {
        if symbol != "AAPL" {
            return Err(MarketError::NotFound);
        }
        Ok(Quote {
            symbol: "AAPL".to_string(),
            display_name: "Apple Inc.".to_string(),
            price: 150.23,
            change_absolute: Some(1.78),
            change_percent: Some(1.2),
            volume: Some(75_000_000),
            week52_low: Some(120.0),
            week52_high: Some(200.0),
        })
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, MarketError> {
        if symbol != "AAPL" {
            return Err(MarketError::NotFound);
        }
        Ok(vec![
            PricePoint {
                date: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
                close_price: 148.2,
            },
            PricePoint {
                date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
                close_price: 149.0,
            },
        ])
    }
}

fn directory_listing() -> Vec<StockSymbol> {
    let mut list = vec![
        StockSymbol::new("AAPL", "APPLE INC"),
        StockSymbol::new("ZION", "ZIONS BANCORPORATION NA"),
    ];
    list.extend((1..=40).map(|i| StockSymbol::new(format!("T{:03}", i), format!("TEST CO {}", i))));
    list
}

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server(mode: DirectoryMode) -> (String, Arc<MockDirectory>) {
    stockwatch_core::common::tls::install_crypto_provider();

    let directory = Arc::new(MockDirectory {
        mode,
        calls: AtomicUsize::new(0),
    });
    let clock = Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap(),
    ));
    let detail = Arc::new(QuoteDetailFetcher::new(Arc::new(MockProvider), clock));

    let state = AppState {
        directory: directory.clone(),
        detail,
        config: Arc::new(AppConfig::default()),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let app = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}", port), directory)
}

#[tokio::test]
async fn test_list_stocks_returns_bare_array() {
    let (base_url, _) = spawn_test_server(DirectoryMode::Listing(directory_listing())).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/stocks", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stocks: Vec<StockResponse> = res.json().await.unwrap();
    assert_eq!(stocks.len(), 42);
    assert_eq!(
        stocks[0],
        StockResponse {
            symbol: "AAPL".to_string(),
            name: "APPLE INC".to_string()
        }
    );
}

#[tokio::test]
async fn test_validate_ticker() {
    let (base_url, directory) =
        spawn_test_server(DirectoryMode::Listing(directory_listing())).await;
    let client = reqwest::Client::new();

    for (ticker, expected) in [("aapl", true), ("ZION", true), ("NOPE", false)] {
        let res = client
            .get(format!("{}/api/stocks", base_url))
            .query(&[("ticker", ticker)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: ValidResponse = res.json().await.unwrap();
        assert_eq!(body.valid, expected, "ticker {}", ticker);
    }
    assert_eq!(directory.calls.load(Ordering::SeqCst), 3);

    // 空白代码不访问目录
    let res = client
        .get(format!("{}/api/stocks?ticker=%20", base_url))
        .send()
        .await
        .unwrap();
    let body: ValidResponse = res.json().await.unwrap();
    assert!(!body.valid);
    assert_eq!(directory.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_missing_key_is_500_with_generic_message() {
    let (base_url, _) = spawn_test_server(DirectoryMode::MissingKey).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/stocks", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ApiErrorResponse = res.json().await.unwrap();
    assert_eq!(body.error, "API key not configured");

    let res = client
        .get(format!("{}/api/stocks?ticker=AAPL", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_upstream_failure_is_500_and_browse_falls_back() {
    let (base_url, _) = spawn_test_server(DirectoryMode::Upstream500).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/stocks", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch stocks");
    // 上游细节不外泄
    assert!(!body.to_string().contains("HTTP 500"));

    // 浏览视图静默回退为热门列表
    let res = client
        .get(format!("{}/api/browse", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: ApiResponse<BrowsePageResponse> = res.json().await.unwrap();
    let page = page.data.unwrap();
    assert!(!page.full_list_loaded);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.stocks.first().map(|s| s.symbol.as_str()), Some("AAPL"));
    assert_eq!(page.total_stocks, page.stocks.len());
}

#[tokio::test]
async fn test_browse_merges_and_paginates() {
    let (base_url, _) = spawn_test_server(DirectoryMode::Listing(directory_listing())).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/browse", base_url))
        .query(&[("q", "test co"), ("page", "2")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: ApiResponse<BrowsePageResponse> = res.json().await.unwrap();
    assert!(page.success);
    let page = page.data.unwrap();

    assert!(page.full_list_loaded);
    assert_eq!(page.filtered_count, 40);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.stocks.len(), 19);
    assert_eq!(page.stocks[0].symbol, "T022");
    assert_eq!(page.page_numbers, vec![1, 2]);
    assert_eq!(
        page.results_line.as_deref(),
        Some("Showing 22-40 of 40 stocks | Page 2 of 2")
    );

    // 越界页码被夹紧到最后一页
    let res = client
        .get(format!("{}/api/browse?q=test%20co&page=99", base_url))
        .send()
        .await
        .unwrap();
    let page: ApiResponse<BrowsePageResponse> = res.json().await.unwrap();
    assert_eq!(page.data.unwrap().current_page, 2);
}

#[tokio::test]
async fn test_quote_detail() {
    let (base_url, _) = spawn_test_server(DirectoryMode::MissingKey).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/stocks/aapl/quote", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: ApiResponse<QuoteSnapshotResponse> = res.json().await.unwrap();
    let snapshot = body.data.unwrap();
    assert_eq!(snapshot.symbol, "AAPL");
    assert_eq!(snapshot.price, "150.23");
    assert_eq!(snapshot.volume, Some(75_000_000));
    let dates: Vec<&str> = snapshot.history.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-10-15", "2026-10-16"]);

    let res = client
        .get(format!("{}/api/stocks/zzzz/quote", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: ApiErrorResponse = res.json().await.unwrap();
    assert!(!body.success);
    assert_eq!(body.error, "error fetching data for ZZZZ");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let (base_url, _) = spawn_test_server(DirectoryMode::MissingKey).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api-docs/openapi.json", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/stocks"));
    assert!(paths.contains_key("/api/stocks/{symbol}/quote"));
    assert!(paths.contains_key("/api/browse"));
}
