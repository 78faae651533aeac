//! # 浏览视图路由控制器
//!
//! 实现 `/api/browse`：热门列表合并完整目录后的搜索与分页结果。

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use stockwatch_browser::StockListBrowser;
use stockwatch_browser::popular::popular_stocks;
use utoipa::IntoParams;

use crate::server::AppState;
use crate::types::{ApiResponse, BrowsePageResponse};

/// `/api/browse` 查询参数
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BrowseQuery {
    /// 搜索关键字 (代码或名称)
    pub q: Option<String>,
    /// 页码 (1 起算)，越界时夹到合法范围
    pub page: Option<usize>,
}

/// 浏览全部股票
///
/// 热门股票始终排在最前；完整目录加载失败时静默回退为只浏览热门列表。
///
/// 每次请求对应一次浏览视图，都会向代码目录重新拉取完整列表 (单次尝试)，
/// 服务端不缓存目录；需要连续翻页的客户端应使用 `GET /api/stocks` 在本地分页。
#[utoipa::path(
    get,
    path = "/api/browse",
    tag = "浏览 (Browse)",
    params(BrowseQuery),
    responses(
        (status = 200, description = "当前页", body = ApiResponse<BrowsePageResponse>)
    )
)]
pub async fn browse_stocks(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Json<ApiResponse<BrowsePageResponse>> {
    let mut browser = StockListBrowser::with_config(popular_stocks(), &state.config.browser);
    browser.load_supplement(state.directory.as_ref()).await;

    if let Some(q) = query.q {
        browser.set_query(q);
    }
    if let Some(page) = query.page {
        let page = page.clamp(1, browser.total_pages());
        browser.go_to(page);
    }

    Json(ApiResponse::ok(BrowsePageResponse::from(&browser)))
}
