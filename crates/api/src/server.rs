//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use stockwatch_core::config::AppConfig;
use stockwatch_core::directory::port::SymbolDirectory;
use stockwatch_market::QuoteDetailFetcher;

use crate::routes::{browse, quote, stocks};
use crate::types::ValidResponse;

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有字段在服务启动前由 DI 容器注入，之后只读，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 代码目录网关
    pub directory: Arc<dyn SymbolDirectory>,
    /// 行情详情获取器
    pub detail: Arc<QuoteDetailFetcher>,
    /// 全局配置 (浏览器页长等)
    pub config: Arc<AppConfig>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "stockwatch API",
        version = "0.1.0",
        description = "股票自选与浏览服务的 RESTful API。提供美股代码目录、代码校验、行情详情与分页浏览功能。",
        license(name = "MIT")
    ),
    components(schemas(ValidResponse)),
    tags(
        (name = "代码目录 (Directory)", description = "全部美股代码列表与代码校验"),
        (name = "行情 (Market)", description = "单只股票的报价与近期日线"),
        (name = "浏览 (Browse)", description = "热门优先的全部股票搜索与分页")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// # Summary
/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
///
/// # Returns
/// 可直接交给 `axum::serve` 的 Router。
pub fn build_router(state: AppState) -> Router {
    // 1. 收集路由与 OpenAPI Doc (本服务无鉴权)
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(stocks::list_stocks))
        .routes(routes!(quote::get_quote))
        .routes(routes!(browse::browse_stocks))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (允许所有来源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// # Summary
/// 在已绑定的监听器上提供服务，直到收到 Ctrl-C。
///
/// # Arguments
/// * `listener` - 已绑定的 TCP 监听器
/// * `state` - 共享状态
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("API server stopped");
    Ok(())
}

/// # Summary
/// 绑定端口并启动 HTTP 服务。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
///
/// # Returns
/// 绑定失败或服务异常退出时返回错误。
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;

    tracing::info!("stockwatch API server listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(listener, state).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // 无法监听信号时保持运行，交由进程管理器结束
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
