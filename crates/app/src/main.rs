mod settings;

use std::sync::Arc;

use stockwatch_api::server::{AppState, start_server};
use stockwatch_core::common::time::RealTimeProvider;
use stockwatch_core::common::tls::install_crypto_provider;
use stockwatch_core::directory::port::SymbolDirectory;
use stockwatch_feed::finnhub::FinnhubDirectory;
use stockwatch_feed::yahoo::YahooProvider;
use stockwatch_market::QuoteDetailFetcher;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// # Summary
/// 初始化全局日志：`RUST_LOG` 优先，默认 `info`，经非阻塞写入器输出到 stdout。
///
/// # Returns
/// 写入器守卫，需存活至进程结束以冲刷缓冲。
fn init_tracing() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();
    guard
}

/// # Summary
/// 服务端启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 API 层。
///
/// # Logic
/// 1. 加载 `.env` 并初始化全局日志。
/// 2. 安装 TLS 加密后端，加载分层配置。
/// 3. 实例化基础设施层（Finnhub 目录、Yahoo 行情）。
/// 4. 构造详情服务并组装 AppState。
/// 5. 启动 HTTP 服务，直到收到 Ctrl-C。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 环境与日志
    let dotenv = dotenvy::dotenv();
    let _guard = init_tracing();
    if let Err(e) = dotenv
        && !e.not_found()
    {
        warn!("Failed to load .env: {}", e);
    }
    info!("stockwatch server starting...");

    // 2. TLS 与配置
    install_crypto_provider();
    let config = Arc::new(settings::load(settings::CONFIG_FILE)?);
    info!("Configuration loaded: {:?}", config);
    if config.provider.api_key().is_none() {
        warn!("Finnhub API key not configured; /api/stocks will report a configuration error");
    }

    // 3. 基础设施层
    let directory: Arc<dyn SymbolDirectory> = Arc::new(FinnhubDirectory::new(&config.provider)?);
    let provider = Arc::new(YahooProvider::new(&config.provider)?);

    // 4. 领域服务与共享状态
    let detail = Arc::new(QuoteDetailFetcher::new(provider, Arc::new(RealTimeProvider)));
    let state = AppState {
        directory,
        detail,
        config: config.clone(),
    };

    // 5. 启动服务
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    start_server(state, &bind_addr).await?;

    info!("Shutdown complete. Exiting...");
    Ok(())
}
