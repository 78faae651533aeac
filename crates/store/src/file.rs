use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use stockwatch_core::store::error::StoreError;
use stockwatch_core::store::port::SlotStorage;
use tokio::fs;
use tracing::debug;

/// 存储槽文件扩展名
const SLOT_EXTENSION: &str = "json";

/// SlotStorage 的文件实现。
///
/// # Summary
/// 每个存储槽对应根目录下的一个文件 (`<root>/<slot>.json`)，作为客户端的本地持久化介质。
///
/// # Invariants
/// * 存储槽名称只允许 ASCII 字母、数字、`-` 与 `_`，防止路径穿越。
/// * 写入先落到临时文件再原子重命名，读取方不会看到半写的内容。
pub struct FileSlotStorage {
    root: PathBuf,
}

impl FileSlotStorage {
    /// 使用指定根目录创建文件存储。
    pub async fn with_root(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::InitError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// # Summary
    /// 解析存储槽对应的文件路径。
    ///
    /// # Returns
    /// 名称合法时返回路径，否则返回 `StoreError::Storage`。
    fn slot_path(&self, slot: &str) -> Result<PathBuf, StoreError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::Storage(format!("Invalid slot name: {:?}", slot)));
        }
        Ok(self.root.join(format!("{}.{}", slot, SLOT_EXTENSION)))
    }
}

#[async_trait]
impl SlotStorage for FileSlotStorage {
    /// # Summary
    /// 写入存储槽文件。
    ///
    /// # Logic
    /// 1. 写入同目录下的 `.tmp` 临时文件。
    /// 2. 重命名覆盖目标文件。
    async fn set_raw(&self, slot: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let path = self.slot_path(slot)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &value)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        debug!("Slot {} written ({} bytes)", slot, value.len());
        Ok(())
    }

    async fn get_raw(&self, slot: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.slot_path(slot)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }

    async fn del(&self, slot: &str) -> Result<(), StoreError> {
        let path = self.slot_path(slot)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }
}
