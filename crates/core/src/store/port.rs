use crate::store::error::StoreError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// # Summary
/// 客户端本地存储接口 (Port)，以具名存储槽保存原始字节。
///
/// # Invariants
/// - 处理原始字节，确保 Trait 是对象安全的 (Object Safe)。
/// - 不理解数据格式，也不提供版本管理；数据含义由上游业务层决定。
#[async_trait]
pub trait SlotStorage: Send + Sync {
    /// # Summary
    /// 写入存储槽。
    ///
    /// # Logic
    /// 1. 以覆盖方式写入完整内容。
    ///
    /// # Arguments
    /// * `slot`: 存储槽名称。
    /// * `value`: 原始字节数组。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`。
    async fn set_raw(&self, slot: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// # Summary
    /// 读取存储槽。
    ///
    /// # Arguments
    /// * `slot`: 存储槽名称。
    ///
    /// # Returns
    /// 存在则返回 `Some(Vec<u8>)`，否则返回 `None`。
    async fn get_raw(&self, slot: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// # Summary
    /// 删除存储槽。
    ///
    /// # Returns
    /// 无论存储槽是否存在均返回 Ok。
    async fn del(&self, slot: &str) -> Result<(), StoreError>;
}

/// # Summary
/// 存储泛型扩展接口，提供 JSON 序列化支持。
///
/// # Invariants
/// - 自动为所有实现 `SlotStorage` 的类型提供支持。
#[async_trait]
pub trait SlotStorageExt: SlotStorage {
    /// # Summary
    /// 存入强类型对象。
    ///
    /// # Logic
    /// 1. 使用 JSON 序列化对象。
    /// 2. 调用底层 `set_raw` 写入。
    async fn set<T: Serialize + Send + Sync>(
        &self,
        slot: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.set_raw(slot, bytes).await
    }

    /// # Summary
    /// 取出强类型对象。
    ///
    /// # Logic
    /// 1. 调用底层 `get_raw` 获取字节。
    /// 2. 使用 JSON 反序列化为目标类型。
    ///
    /// # Returns
    /// 反序列化后的对象或 None；内容无法解析时返回 `StoreError::Deserialize`。
    async fn get<T: DeserializeOwned + Send>(&self, slot: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(slot).await? {
            Some(bytes) => {
                let val = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Deserialize(e.to_string()))?;
                Ok(Some(val))
            }
            None => Ok(None),
        }
    }
}

impl<T: SlotStorage + ?Sized> SlotStorageExt for T {}
