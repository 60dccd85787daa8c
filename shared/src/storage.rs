use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::shared_lucky_draw::SpinResult;

/// Last win, persisted client-side as a JSON string
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WinRecord {
    pub amount: u64,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

impl WinRecord {
    pub fn from_result(result: &SpinResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            amount: result.amount,
            label: result.label.clone(),
            timestamp,
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Where the last win is kept. A single slot, overwritten on every save.
pub trait WinStore {
    fn save(&mut self, record: &WinRecord) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<WinRecord>, StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

impl<S: WinStore + ?Sized> WinStore for Box<S> {
    fn save(&mut self, record: &WinRecord) -> Result<(), StorageError> {
        (**self).save(record)
    }

    fn load(&self) -> Result<Option<WinRecord>, StorageError> {
        (**self).load()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Keeps the encoded entry in memory, the same way the browser would.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWinStore {
    entry: Option<String>,
    saves: usize,
}

impl InMemoryWinStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl WinStore for InMemoryWinStore {
    fn save(&mut self, record: &WinRecord) -> Result<(), StorageError> {
        self.entry = Some(record.to_json()?);
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<WinRecord>, StorageError> {
        self.entry.as_deref().map(WinRecord::from_json).transpose()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entry = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(amount: u64, label: &str, secs: i64) -> WinRecord {
        WinRecord {
            amount,
            label: label.to_string(),
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_save_overwrites_previous_win() {
        let mut store = InMemoryWinStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&record(77_000, "PHP 77,000", 1_700_000_000)).unwrap();
        store.save(&record(419_000, "PHP 419,000", 1_700_000_100)).unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(
            store.load().unwrap(),
            Some(record(419_000, "PHP 419,000", 1_700_000_100))
        );

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_entry_is_plain_json() {
        let mut store = InMemoryWinStore::new();
        store.save(&record(176_000, "PHP 176,000", 0)).unwrap();

        let value: serde_json::Value = serde_json::from_str(store.raw().unwrap()).unwrap();
        assert_eq!(value["amount"], 176_000);
        assert_eq!(value["label"], "PHP 176,000");
        assert_eq!(value["timestamp"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_malformed_entry_is_reported() {
        assert!(matches!(
            WinRecord::from_json("{not json"),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn WinStore> = Box::new(InMemoryWinStore::new());
        store.save(&record(1, "One", 5)).unwrap();
        assert_eq!(store.load().unwrap().map(|r| r.amount), Some(1));
    }
}
