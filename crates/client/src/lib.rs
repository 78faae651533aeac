//! # `stockwatch-client` - 终端客户端
//!
//! 持有客户端本地的自选股列表，并通过 stockwatch 服务端浏览股票、查看详情。
//!
//! | 命令 | 说明 |
//! |------|------|
//! | `watchlist [list\|add\|remove\|clear]` | 自选股 (首页) |
//! | `browse [--query Q] [--page P] [--popular-only]` | 全部股票浏览 |
//! | `show SYMBOL` | 单只股票详情 |

pub mod cli;
pub mod commands;
pub mod error;
pub mod http;
