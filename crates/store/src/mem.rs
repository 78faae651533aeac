use async_trait::async_trait;
use dashmap::DashMap;
use stockwatch_core::store::error::StoreError;
use stockwatch_core::store::port::SlotStorage;

/// # Summary
/// 基于 DashMap 的内存存储实现，用作测试替身或无需落盘的会话。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 记录写入次数，便于验证 "每次变更都会持久化"。
pub struct MemSlotStorage {
    // 线程安全的 KV 存储容器
    storage: DashMap<String, Vec<u8>>,
    // 各存储槽累计写入次数
    writes: DashMap<String, usize>,
}

impl MemSlotStorage {
    /// 创建空的内存存储
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            writes: DashMap::new(),
        }
    }

    /// # Summary
    /// 以预置内容创建内存存储。
    ///
    /// # Arguments
    /// * `slot`: 存储槽名称。
    /// * `value`: 预置的原始内容 (可以是损坏的数据)。
    pub fn with_slot(slot: &str, value: impl Into<Vec<u8>>) -> Self {
        let mem = Self::new();
        mem.storage.insert(slot.to_string(), value.into());
        mem
    }

    /// 指定存储槽被 `set_raw` 写入的次数
    pub fn write_count(&self, slot: &str) -> usize {
        self.writes.get(slot).map(|c| *c).unwrap_or(0)
    }
}

impl Default for MemSlotStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlotStorage for MemSlotStorage {
    /// # Summary
    /// 写入原始字节数据，同名存储槽直接覆盖。
    async fn set_raw(&self, slot: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.storage.insert(slot.to_string(), value);
        *self.writes.entry(slot.to_string()).or_insert(0) += 1;
        Ok(())
    }

    /// # Summary
    /// 读取原始字节数据。
    ///
    /// # Logic
    /// 从哈希表中检索引用，并将其克隆为独立的所有权对象返回。
    async fn get_raw(&self, slot: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.storage.get(slot).map(|v| v.value().clone()))
    }

    async fn del(&self, slot: &str) -> Result<(), StoreError> {
        self.storage.remove(slot);
        Ok(())
    }
}
