//! # `stockwatch-core` - 领域契约层
//!
//! 定义证券代码、行情快照等核心实体，以及外部依赖 (代码目录、行情源、客户端本地存储)
//! 的 Port 接口与错误类型。所有具体实现位于下游 crate 中。

pub mod common;
pub mod config;
pub mod directory;
pub mod market;
pub mod store;
