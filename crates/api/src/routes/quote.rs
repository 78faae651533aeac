//! # 行情详情路由控制器
//!
//! 实现 `/api/stocks/{symbol}/quote`，对应详情页的数据源。

use axum::Json;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, ApiResponse, QuoteSnapshotResponse};

/// 获取单只股票的报价与最近 7 天日线收盘价
///
/// 每次请求都会实时访问行情数据源，不做缓存。
/// 代码无效与上游故障统一返回 404 `error fetching data for SYMBOL`。
#[utoipa::path(
    get,
    path = "/api/stocks/{symbol}/quote",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "股票代码 (不区分大小写)")
    ),
    responses(
        (status = 200, description = "行情快照", body = ApiResponse<QuoteSnapshotResponse>),
        (status = 404, description = "无法获取该代码的数据", body = ApiErrorResponse)
    )
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<QuoteSnapshotResponse>>, ApiError> {
    let snapshot = state.detail.fetch(&symbol).await?;
    Ok(Json(ApiResponse::ok(snapshot.into())))
}
