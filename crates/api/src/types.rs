//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use stockwatch_browser::StockListBrowser;
use stockwatch_core::common::StockSymbol;
use stockwatch_core::market::entity::{PricePoint, QuoteSnapshot};
use utoipa::ToSchema;

// ============================================================
//  代码目录 DTO
// ============================================================

/// 股票代码记录 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockResponse {
    /// 股票代码
    #[schema(example = "AAPL")]
    pub symbol: String,
    /// 公司名称
    #[schema(example = "APPLE INC")]
    pub name: String,
}

/// 代码校验结果 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidResponse {
    /// 代码是否存在于目录中
    #[schema(example = true)]
    pub valid: bool,
}

// ============================================================
//  行情详情 DTO
// ============================================================

/// 日线收盘点 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PricePointResponse {
    /// 交易日 (YYYY-MM-DD)
    #[schema(example = "2026-10-16")]
    pub date: String,
    /// 收盘价
    #[schema(example = "150.23")]
    pub close_price: String,
}

/// 详情页行情快照 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteSnapshotResponse {
    /// 股票代码
    #[schema(example = "AAPL")]
    pub symbol: String,
    /// 展示名称
    #[schema(example = "Apple Inc.")]
    pub display_name: String,
    /// 最新价
    #[schema(example = "150.23")]
    pub price: String,
    /// 涨跌额
    #[schema(example = "1.78")]
    pub change_absolute: Option<String>,
    /// 涨跌幅 (百分比)
    #[schema(example = "1.2")]
    pub change_percent: Option<String>,
    /// 成交量
    #[schema(example = 75000000)]
    pub volume: Option<u64>,
    /// 52 周最低价
    #[schema(example = "120")]
    pub week52_low: Option<String>,
    /// 52 周最高价
    #[schema(example = "200")]
    pub week52_high: Option<String>,
    /// 最近 7 天日线收盘价 (数据源顺序)
    pub history: Vec<PricePointResponse>,
}

// ============================================================
//  浏览视图 DTO
// ============================================================

/// 全部股票浏览页 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrowsePageResponse {
    /// 当前查询串
    #[schema(example = "app")]
    pub query: String,
    /// 当前页记录
    pub stocks: Vec<StockResponse>,
    /// 当前页码 (1 起算)
    #[schema(example = 1)]
    pub current_page: usize,
    /// 总页数 (至少为 1)
    #[schema(example = 3)]
    pub total_pages: usize,
    /// 过滤后的记录数
    #[schema(example = 47)]
    pub filtered_count: usize,
    /// 可浏览的记录总数 (热门 + 目录)
    #[schema(example = 12000)]
    pub total_stocks: usize,
    /// 当前页首条记录下标 (0 起算)
    pub start_index: usize,
    /// 当前页末条记录下标 (不含)
    pub end_index: usize,
    /// 页码按钮窗口
    pub page_numbers: Vec<usize>,
    /// 完整目录是否已合并
    pub full_list_loaded: bool,
    /// 是否提供跳页输入 (多于 10 页)
    pub show_jump_to: bool,
    /// 列表上方的状态说明
    pub status_line: String,
    /// 结果区间说明 (无命中时为 null)
    pub results_line: Option<String>,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  领域模型 → DTO 转换
// ============================================================

// 浮点价格转十进制字符串，非有限值输出为 "0"
fn decimal_str(value: f64) -> String {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .normalize()
        .to_string()
}

impl From<StockSymbol> for StockResponse {
    fn from(s: StockSymbol) -> Self {
        Self {
            symbol: s.symbol,
            name: s.name,
        }
    }
}

impl From<PricePoint> for PricePointResponse {
    fn from(p: PricePoint) -> Self {
        Self {
            date: p.date.format("%Y-%m-%d").to_string(),
            close_price: decimal_str(p.close_price),
        }
    }
}

impl From<QuoteSnapshot> for QuoteSnapshotResponse {
    fn from(s: QuoteSnapshot) -> Self {
        let q = s.quote;
        Self {
            symbol: q.symbol,
            display_name: q.display_name,
            price: decimal_str(q.price),
            change_absolute: q.change_absolute.map(decimal_str),
            change_percent: q.change_percent.map(decimal_str),
            volume: q.volume,
            week52_low: q.week52_low.map(decimal_str),
            week52_high: q.week52_high.map(decimal_str),
            history: s.history.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&StockListBrowser> for BrowsePageResponse {
    fn from(b: &StockListBrowser) -> Self {
        let page = b.visible_page();
        Self {
            query: b.query().to_string(),
            stocks: page.records.into_iter().map(Into::into).collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            filtered_count: page.filtered_count,
            total_stocks: b.effective().len(),
            start_index: page.start_index,
            end_index: page.end_index,
            page_numbers: b.page_numbers(),
            full_list_loaded: b.supplement_state() == stockwatch_browser::SupplementState::Loaded,
            show_jump_to: b.show_jump_to(),
            status_line: b.status_line(),
            results_line: b.results_line(),
        }
    }
}
