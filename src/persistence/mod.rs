//! Save/load with a versioned envelope
//!
//! Every persisted value is stored as JSON wrapped in
//! `{"version": N, "payload": ...}`. A missing key, unreadable JSON or an
//! unknown version all fall back to the type's default on [`load_or_default`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::{Storage, StorageError};

/// Current envelope format version
pub const FORMAT_VERSION: u32 = 1;

/// Persistence failure
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid saved data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

/// Write `value` under `key`
pub fn save<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(&EnvelopeRef {
        version: FORMAT_VERSION,
        payload: value,
    })?;
    storage.set_item(key, &json)?;
    Ok(())
}

/// Read the value under `key`, `None` if nothing is stored
pub fn load<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    let Some(json) = storage.get_item(key)? else {
        return Ok(None);
    };

    // Check the version before committing to the payload's shape
    let header: Envelope<serde_json::Value> = serde_json::from_str(&json)?;
    if header.version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: header.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(Some(serde_json::from_value(header.payload)?))
}

/// Read the value under `key`, falling back to the default on any failure
pub fn load_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    match load(storage, key) {
        Ok(Some(value)) => {
            log::info!("Loaded {key}");
            value
        }
        Ok(None) => {
            log::info!("No saved {key}, starting fresh");
            T::default()
        }
        Err(e) => {
            log::warn!("Discarding saved {key}: {e}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: u32,
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let sample = Sample {
            name: "Ada".to_string(),
            value: 12,
        };
        save(&mut storage, "sample", &sample).unwrap();

        let raw = storage.get_item("sample").unwrap().unwrap();
        assert!(raw.starts_with("{\"version\":1,"));

        let loaded: Option<Sample> = load(&storage, "sample").unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn test_missing_key() {
        let storage = MemoryStorage::new();
        let loaded: Option<Sample> = load(&storage, "sample").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("sample", r#"{"version":99,"payload":{"name":"x","value":1}}"#)
            .unwrap();
        let err = load::<Sample>(&storage, "sample").unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnsupportedVersion { found: 99, .. }
        ));
        assert_eq!(load_or_default::<Sample>(&storage, "sample"), Sample::default());
    }

    #[test]
    fn test_corrupt_data_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set_item("sample", "not json").unwrap();
        assert!(matches!(
            load::<Sample>(&storage, "sample"),
            Err(PersistenceError::Json(_))
        ));
        assert_eq!(load_or_default::<Sample>(&storage, "sample"), Sample::default());
    }
}
