//! # `stockwatch-store` - 客户端本地存储
//!
//! 提供 `SlotStorage` 的内存实现与文件实现，以及构建于其上的自选股存储 `WatchlistStore`。

pub mod file;
pub mod mem;
pub mod watchlist;
