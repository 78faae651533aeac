//! # `stockwatch-market` - 行情详情服务
//!
//! 负责单只股票详情页所需的数据：即时报价与最近 7 天的日线收盘价。
//! 数据源通过 `QuoteProvider` 端口注入，当前时间通过 `TimeProvider` 注入。

pub mod detail;
pub mod error;

pub use detail::QuoteDetailFetcher;
pub use error::DetailError;
