use std::sync::Arc;
use stockwatch_core::common::normalize_ticker;
use stockwatch_core::store::error::StoreError;
use stockwatch_core::store::port::{SlotStorage, SlotStorageExt};
use tracing::{debug, warn};

/// 默认的自选股存储槽名称
pub const DEFAULT_WATCHLIST_SLOT: &str = "watchlist";

/// # Summary
/// 用户自选股存储，持有有序且去重的股票代码列表，并在每次变更后持久化。
///
/// # Invariants
/// - 只能通过 `load` 构造，保证首次写入发生在初始读取之后，避免用空列表覆盖已有数据。
/// - 列表中的代码均已去空白并大写，且互不重复；顺序即添加顺序。
pub struct WatchlistStore {
    // 客户端本地存储
    storage: Arc<dyn SlotStorage>,
    // 存储槽名称
    slot: String,
    // 内存中的自选股列表
    symbols: Vec<String>,
}

impl WatchlistStore {
    /// # Summary
    /// 从默认存储槽加载自选股。
    pub async fn load(storage: Arc<dyn SlotStorage>) -> Self {
        Self::load_from(storage, DEFAULT_WATCHLIST_SLOT).await
    }

    /// # Summary
    /// 从指定存储槽加载自选股。
    ///
    /// # Logic
    /// 1. 读取存储槽并按 JSON 字符串数组解析。
    /// 2. 内容缺失、为空、无法解析或读取失败时均视为 "尚无自选股"，不向调用方报错。
    /// 3. 对读到的条目再次规范化与去重，容忍手工编辑过的数据。
    ///
    /// # Arguments
    /// * `storage`: 本地存储实现。
    /// * `slot`: 存储槽名称。
    ///
    /// # Returns
    /// 初始化完成的 WatchlistStore。
    pub async fn load_from(storage: Arc<dyn SlotStorage>, slot: &str) -> Self {
        let persisted = match storage.get::<Vec<String>>(slot).await {
            Ok(Some(list)) => list,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Watchlist slot {} unreadable, starting empty: {}", slot, e);
                Vec::new()
            }
        };

        let mut symbols: Vec<String> = Vec::with_capacity(persisted.len());
        for raw in persisted {
            if let Some(ticker) = normalize_ticker(&raw)
                && !symbols.contains(&ticker)
            {
                symbols.push(ticker);
            }
        }
        debug!("Watchlist loaded with {} symbols", symbols.len());

        Self {
            storage,
            slot: slot.to_string(),
            symbols,
        }
    }

    /// 当前自选股 (按添加顺序)
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// 是否已包含指定代码 (输入会先规范化)
    pub fn contains(&self, ticker: &str) -> bool {
        normalize_ticker(ticker).is_some_and(|t| self.symbols.contains(&t))
    }

    /// # Summary
    /// 添加股票代码。
    ///
    /// # Logic
    /// 1. 去空白并转大写；结果为空或已存在时不做任何事 (也不持久化)。
    /// 2. 否则追加到末尾并持久化。
    ///
    /// # Returns
    /// 实际发生添加返回 `Ok(true)`；持久化失败返回 `StoreError`。
    pub async fn add(&mut self, ticker: &str) -> Result<bool, StoreError> {
        let Some(ticker) = normalize_ticker(ticker) else {
            return Ok(false);
        };
        if self.symbols.contains(&ticker) {
            return Ok(false);
        }
        self.symbols.push(ticker);
        self.persist().await?;
        Ok(true)
    }

    /// # Summary
    /// 移除股票代码。
    ///
    /// # Logic
    /// 1. 规范化后移除完全匹配的条目。
    /// 2. 无论是否移除都会持久化。
    ///
    /// # Returns
    /// 实际发生移除返回 `Ok(true)`。
    pub async fn remove(&mut self, ticker: &str) -> Result<bool, StoreError> {
        let before = self.symbols.len();
        if let Some(ticker) = normalize_ticker(ticker) {
            self.symbols.retain(|s| *s != ticker);
        }
        let removed = self.symbols.len() != before;
        self.persist().await?;
        Ok(removed)
    }

    /// 清空自选股并持久化
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.symbols.clear();
        self.persist().await
    }

    async fn persist(&self) -> Result<(), StoreError> {
        self.storage.set(&self.slot, &self.symbols).await
    }
}
