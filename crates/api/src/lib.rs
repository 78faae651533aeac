//! # `stockwatch-api` - HTTP API 网关
//!
//! 本 crate 是 stockwatch 的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - `GET /api/stocks`：代码目录全量列表与代码校验
//! - `GET /api/stocks/{symbol}/quote`：单只股票详情 (报价 + 7 日历史)
//! - `GET /api/browse`：服务端渲染的全部股票浏览视图 (搜索 + 分页)
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
