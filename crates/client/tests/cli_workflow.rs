use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use stockwatch_api::server::{AppState, build_router};
use stockwatch_client::cli::Cli;
use stockwatch_client::commands;
use stockwatch_client::error::ClientError;
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

/// 服务端使用的模拟代码目录；`fail` 为 true 时模拟上游 500
struct MockDirectory {
    fail: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl SymbolDirectory for MockDirectory {
    async fn list_all(&self) -> Result<Vec<StockSymbol>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DirectoryError::Upstream("HTTP 500".to_string()));
        }
        let mut list = vec![
            StockSymbol::new("AAPL", "APPLE INC"),
            StockSymbol::new("ZION", "ZIONS BANCORPORATION NA"),
        ];
        list.extend(
            (1..=30).map(|i| StockSymbol::new(format!("Q{:03}", i), format!("QUANT FUND {}", i))),
        );
        Ok(list)
    }
}

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
            price: 150.25,
            change_absolute: Some(1.75),
            change_percent: Some(1.25),
            volume: Some(75_000_000),
            week52_low: Some(120.0),
            week52_high: Some(200.0),
        })
    }

    async fn fetch_history(
        &self,
        _symbol: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>, MarketError> {
        Ok(vec![PricePoint {
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            close_price: 149.0,
        }])
    }
}

async fn spawn_server(fail_directory: bool) -> (String, Arc<MockDirectory>) {
    stockwatch_core::common::tls::install_crypto_provider();

    let directory = Arc::new(MockDirectory {
        fail: fail_directory,
        calls: AtomicUsize::new(0),
    });
    let clock = Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap(),
    ));
    let state = AppState {
        directory: directory.clone(),
        detail: Arc::new(QuoteDetailFetcher::new(Arc::new(MockProvider), clock)),
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

/// 以命令行参数运行一条命令，返回输出文本
async fn run(server: &str, data_dir: &Path, args: &[&str]) -> Result<String, ClientError> {
    let mut argv = vec![
        "stockwatch",
        "--server-url",
        server,
        "--data-dir",
        data_dir.to_str().unwrap(),
    ];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    commands::run(&cli, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn stored_watchlist(data_dir: &Path) -> Vec<String> {
    let raw = std::fs::read(data_dir.join("watchlist.json")).unwrap();
    serde_json::from_slice(&raw).unwrap()
}

#[tokio::test]
async fn test_watchlist_add_validates_and_persists() {
    let (server, _) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();

    let output = run(&server, dir.path(), &["watchlist"]).await.unwrap();
    assert!(output.contains("No stocks added yet."));

    let output = run(&server, dir.path(), &["watchlist", "add", " aapl "])
        .await
        .unwrap();
    assert!(output.contains("Added AAPL"));
    assert_eq!(stored_watchlist(dir.path()), vec!["AAPL"]);

    // 重复添加不会产生第二条
    let output = run(&server, dir.path(), &["watchlist", "add", "AAPL"])
        .await
        .unwrap();
    assert!(output.contains("AAPL is already in your watchlist"));
    assert_eq!(stored_watchlist(dir.path()), vec!["AAPL"]);

    let err = run(&server, dir.path(), &["watchlist", "add", "nope"])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Ticker NOPE is invalid");
    assert_eq!(err.exit_code(), 2);
    assert_eq!(stored_watchlist(dir.path()), vec!["AAPL"]);

    // 跳过校验时直接写入
    run(&server, dir.path(), &["watchlist", "add", "nope", "--no-validate"])
        .await
        .unwrap();
    assert_eq!(stored_watchlist(dir.path()), vec!["AAPL", "NOPE"]);
}

#[tokio::test]
async fn test_watchlist_remove_round_trip() {
    let (server, _) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("watchlist.json"), br#"["AAPL","TSLA"]"#).unwrap();

    let output = run(&server, dir.path(), &["watchlist", "remove", "aapl"])
        .await
        .unwrap();
    assert!(output.contains("Removed AAPL"));
    assert!(output.contains("  TSLA"));
    assert_eq!(stored_watchlist(dir.path()), vec!["TSLA"]);

    let output = run(&server, dir.path(), &["watchlist", "remove", "MSFT"])
        .await
        .unwrap();
    assert!(output.contains("MSFT was not in your watchlist"));
    assert_eq!(stored_watchlist(dir.path()), vec!["TSLA"]);

    run(&server, dir.path(), &["watchlist", "clear"]).await.unwrap();
    assert!(stored_watchlist(dir.path()).is_empty());
}

#[tokio::test]
async fn test_watchlist_slot_option_selects_file() {
    let (server, _) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("watchlist.json"), br#"["TSLA"]"#).unwrap();

    let output = run(
        &server,
        dir.path(),
        &["--watchlist-slot", "work", "watchlist", "add", "AAPL"],
    )
    .await
    .unwrap();
    assert!(output.contains("  AAPL"));
    assert!(!output.contains("TSLA"));

    let raw = std::fs::read(dir.path().join("work.json")).unwrap();
    let work: Vec<String> = serde_json::from_slice(&raw).unwrap();
    assert_eq!(work, vec!["AAPL"]);
    // 默认槽保持不变
    assert_eq!(stored_watchlist(dir.path()), vec!["TSLA"]);
}

#[tokio::test]
async fn test_corrupt_watchlist_starts_empty() {
    let (server, _) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("watchlist.json"), b"{not json").unwrap();

    let output = run(&server, dir.path(), &["watchlist", "list"]).await.unwrap();
    assert!(output.contains("No stocks added yet."));
}

#[tokio::test]
async fn test_validation_failure_is_not_invalid_ticker() {
    let (server, _) = spawn_server(true).await;
    let dir = tempfile::tempdir().unwrap();

    let err = run(&server, dir.path(), &["watchlist", "add", "AAPL"])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(err.to_string().contains("Failed to fetch stocks"));
}

#[tokio::test]
async fn test_browse_falls_back_to_popular_on_directory_failure() {
    let (server, directory) = spawn_server(true).await;
    let dir = tempfile::tempdir().unwrap();

    let output = run(&server, dir.path(), &["browse"]).await.unwrap();
    assert!(output.starts_with("Search through 15 stocks (popular stocks always shown first):"));
    assert!(output.contains("Showing 1-15 of 15 stocks"));
    assert!(output.contains("AAPL"));
    assert!(!output.contains("Pages:"));
    assert_eq!(directory.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_browse_query_and_page() {
    let (server, _) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();

    let output = run(
        &server,
        dir.path(),
        &["browse", "--query", "quant", "--page", "2", "--page-size", "10"],
    )
    .await
    .unwrap();
    assert!(output.contains("Search through 46 stocks"));
    assert!(output.contains("Showing 11-20 of 30 stocks | Page 2 of 3"));
    assert!(output.contains("Q011"));
    assert!(!output.contains("Q010"));
    assert!(output.contains("Pages: 1 [2] 3"));
    assert!(output.contains("Next: --page 3"));

    let output = run(&server, dir.path(), &["browse", "--query", "quant", "--page", "9"])
        .await
        .unwrap();
    assert!(output.contains("Page 9 is out of range (1-2), showing page 1"));
    assert!(output.contains("Showing 1-21 of 30 stocks | Page 1 of 2"));

    let output = run(&server, dir.path(), &["browse", "--query", "quant", "--page", "abc"])
        .await
        .unwrap();
    assert!(output.contains("Invalid page \"abc\", showing page 1"));
    assert!(!output.contains("out of range"));
    assert!(output.contains("Page 1 of 2"));

    let output = run(&server, dir.path(), &["browse", "-q", "xyzzy"]).await.unwrap();
    assert!(output.contains("No stocks match your search."));
}

#[tokio::test]
async fn test_browse_popular_only_skips_directory() {
    let (server, directory) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();

    let output = run(&server, dir.path(), &["browse", "--popular-only", "-q", "zi"])
        .await
        .unwrap();
    assert!(output.contains("No stocks match your search."));
    assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_show_detail() {
    let (server, _) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();

    let output = run(&server, dir.path(), &["show", "aapl"]).await.unwrap();
    assert!(output.contains("AAPL Stock (Apple Inc.)"));
    assert!(output.contains("Current Price: $150.25"));
    assert!(output.contains("Change: +1.25% (+1.75)"));
    assert!(output.contains("Volume: 75M"));
    assert!(output.contains("52-Week Range: $120 - $200"));
    assert!(output.contains("2026-10-16  149"));

    let err = run(&server, dir.path(), &["show", "zzzz"]).await.unwrap_err();
    assert_eq!(err.to_string(), "error fetching data for ZZZZ");
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_show_symbol_with_url_syntax_is_not_found() {
    let (server, _) = spawn_server(false).await;
    let dir = tempfile::tempdir().unwrap();

    for symbol in ["foo/../aapl", "aapl?x=1"] {
        let err = run(&server, dir.path(), &["show", symbol]).await.unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 404, .. }));
        assert_eq!(
            err.to_string(),
            format!("error fetching data for {}", symbol.to_uppercase())
        );
    }
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let dir = tempfile::tempdir().unwrap();
    stockwatch_core::common::tls::install_crypto_provider();

    let err = run("http://127.0.0.1:9", dir.path(), &["show", "AAPL"])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
