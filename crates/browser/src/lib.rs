//! # `stockwatch-browser` - 股票列表浏览器
//!
//! 在 "热门列表 + 可选的完整目录" 之上提供增量搜索与固定页长分页。
//! 合并、过滤、分页均为纯函数，可脱离任何界面直接调用；
//! `StockListBrowser` 在其上维护查询、当前页与目录加载状态。

pub mod browser;
pub mod filter;
pub mod merge;
pub mod pagination;
pub mod popular;

pub use browser::{StockListBrowser, SupplementState, VisiblePage, compute_visible_page};
