use shared::{StorageError, WinRecord, WinStore};
use web_sys::{window, Storage};

/// Win record kept in the browser's `localStorage` under a single key.
pub struct LocalStorageWinStore {
    key: String,
}

impl LocalStorageWinStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn local_storage() -> Result<Storage, StorageError> {
    window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|e| StorageError::Backend(format!("{:?}", e)))?
        .ok_or(StorageError::Unavailable)
}

impl WinStore for LocalStorageWinStore {
    fn save(&mut self, record: &WinRecord) -> Result<(), StorageError> {
        let json = record.to_json()?;
        local_storage()?
            .set_item(&self.key, &json)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn load(&self) -> Result<Option<WinRecord>, StorageError> {
        let raw = local_storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))?;
        raw.as_deref().map(WinRecord::from_json).transpose()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(&self.key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}
