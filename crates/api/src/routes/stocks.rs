//! # 代码目录路由控制器
//!
//! 实现 `/api/stocks`：无参数时返回全部美股代码，带 `ticker` 参数时校验单个代码。

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, StockResponse, ValidResponse};

/// `/api/stocks` 查询参数
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StocksQuery {
    /// 待校验的股票代码，提供时只返回 `{valid}`
    pub ticker: Option<String>,
}

/// 列出全部美股代码，或校验单个代码
///
/// 无 `ticker` 参数时返回 `[{symbol, name}]` 数组；带 `ticker` 参数时返回 `{valid}`。
/// 空白代码直接判定为无效。
#[utoipa::path(
    get,
    path = "/api/stocks",
    tag = "代码目录 (Directory)",
    params(StocksQuery),
    responses(
        (status = 200, description = "代码列表；带 ticker 参数时为 ValidResponse", body = Vec<StockResponse>),
        (status = 500, description = "未配置 API Key 或上游不可用", body = ApiErrorResponse)
    )
)]
pub async fn list_stocks(
    State(state): State<AppState>,
    Query(query): Query<StocksQuery>,
) -> Result<Response, ApiError> {
    if let Some(ticker) = query.ticker {
        let valid = state.directory.validate(&ticker).await?;
        tracing::debug!("Ticker {:?} valid: {}", ticker, valid);
        return Ok(Json(ValidResponse { valid }).into_response());
    }

    let stocks: Vec<StockResponse> = state
        .directory
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    tracing::debug!("Serving {} stocks", stocks.len());
    Ok(Json(stocks).into_response())
}
