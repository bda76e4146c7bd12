#![forbid(unsafe_code)]

//! Persistence adapter between the engine and a [`StorageBackend`].
//!
//! # Layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `{key}` | `{"completed":[0,1],"lastStep":1,"timestamp":1700000000000}` |
//! | `{key}:{tour id}:completed` | `"true"` |
//!
//! # Failure Modes
//!
//! Every storage failure degrades to "no prior state". Read errors and
//! malformed JSON are logged at `warn` and reported as `None`; write errors
//! are logged and dropped. Nothing here ever reaches the host.

use std::fmt;

use guidepost_runtime::StorageBackend;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::error::TourError;

/// The record stored under the persistence key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTourRecord {
    /// Completed step indices.
    #[serde(default)]
    pub completed: Vec<usize>,
    /// Step active when the tour stopped, or `-1`.
    #[serde(default = "no_step")]
    pub last_step: i64,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: u64,
}

fn no_step() -> i64 {
    -1
}

/// Loads and saves tour progress.
pub struct TourPersistence {
    backend: Box<dyn StorageBackend>,
    key: String,
    enabled: bool,
}

impl fmt::Debug for TourPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourPersistence")
            .field("backend", &self.backend.name())
            .field("key", &self.key)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl TourPersistence {
    /// Wrap `backend`. When `enabled` is false every operation is a no-op.
    pub fn new(backend: impl StorageBackend + 'static, key: impl Into<String>, enabled: bool) -> Self {
        Self {
            backend: Box::new(backend),
            key: key.into(),
            enabled,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key of the completion marker for `tour_id`.
    #[must_use]
    pub fn marker_key(&self, tour_id: &str) -> String {
        format!("{}:{tour_id}:completed", self.key)
    }

    /// Read the stored record.
    pub fn load_record(&self) -> Option<PersistedTourRecord> {
        if !self.enabled {
            return None;
        }
        let raw = match self.backend.load(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                report(TourError::from(e), "load");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding malformed tour state");
                None
            }
        }
    }

    /// Write a record stamped with the current time.
    pub fn save_record(&self, completed: impl IntoIterator<Item = usize>, last_step: i64) {
        if !self.enabled {
            return;
        }
        let record = PersistedTourRecord {
            completed: completed.into_iter().collect(),
            last_step,
            timestamp: now_millis(),
        };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "tour state not serializable");
                return;
            }
        };
        match self.backend.save(&self.key, &json) {
            Ok(()) => debug!(key = %self.key, last_step, "tour state saved"),
            Err(e) => report(TourError::from(e), "save"),
        }
    }

    /// Set the completion marker for `tour_id`.
    pub fn mark_completed(&self, tour_id: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.backend.save(&self.marker_key(tour_id), "true") {
            report(TourError::from(e), "mark completed");
        }
    }

    /// Whether the completion marker for `tour_id` is set.
    #[must_use]
    pub fn is_completed(&self, tour_id: &str) -> bool {
        if !self.enabled {
            return false;
        }
        match self.backend.load(&self.marker_key(tour_id)) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                report(TourError::from(e), "read marker");
                false
            }
        }
    }

    /// Remove the completion marker for `tour_id`.
    pub fn clear_completed(&self, tour_id: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.backend.remove(&self.marker_key(tour_id)) {
            report(TourError::from(e), "clear marker");
        }
    }

    /// Remove the stored record.
    pub fn clear_record(&self) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.backend.remove(&self.key) {
            report(TourError::from(e), "clear record");
        }
    }
}

fn report(err: TourError, operation: &str) {
    warn!(operation, error = %err, kind = err.error_type(), "tour persistence failed");
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidepost_runtime::{MemoryStorage, StorageError, StorageResult};

    struct Broken;

    impl StorageBackend for Broken {
        fn name(&self) -> &str {
            "broken"
        }
        fn load(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disabled".into()))
        }
        fn save(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("quota".into()))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn record_round_trip_uses_wire_names() {
        let storage = MemoryStorage::new();
        let persistence = TourPersistence::new(storage.clone(), "tour", true);
        persistence.save_record([0, 1], 1);

        let raw = storage.load("tour").expect("load").expect("present");
        assert!(raw.contains("\"lastStep\":1"), "{raw}");
        assert!(raw.contains("\"completed\":[0,1]"), "{raw}");

        let record = persistence.load_record().expect("record");
        assert_eq!(record.completed, vec![0, 1]);
        assert_eq!(record.last_step, 1);
        assert!(record.timestamp > 0);
    }

    #[test]
    fn marker_uses_namespaced_key() {
        let storage = MemoryStorage::new();
        let persistence = TourPersistence::new(storage.clone(), "guided-tour-state", true);
        assert!(!persistence.is_completed("intro"));
        persistence.mark_completed("intro");
        assert_eq!(
            storage.load("guided-tour-state:intro:completed").expect("load"),
            Some("true".to_string())
        );
        assert!(persistence.is_completed("intro"));
        persistence.clear_completed("intro");
        assert!(!persistence.is_completed("intro"));
    }

    #[test]
    fn malformed_record_is_absent() {
        let storage = MemoryStorage::new();
        storage.save("tour", "{not json").expect("save");
        let persistence = TourPersistence::new(storage, "tour", true);
        assert_eq!(persistence.load_record(), None);
    }

    #[test]
    fn partial_record_fills_defaults() {
        let storage = MemoryStorage::new();
        storage.save("tour", r#"{"completed":[2]}"#).expect("save");
        let record = TourPersistence::new(storage, "tour", true)
            .load_record()
            .expect("record");
        assert_eq!(record.completed, vec![2]);
        assert_eq!(record.last_step, -1);
    }

    #[test]
    fn failures_are_swallowed() {
        let persistence = TourPersistence::new(Broken, "tour", true);
        persistence.save_record([0], 0);
        persistence.mark_completed("intro");
        persistence.clear_completed("intro");
        assert_eq!(persistence.load_record(), None);
        assert!(!persistence.is_completed("intro"));
    }

    #[test]
    fn disabled_touches_nothing() {
        let storage = MemoryStorage::new();
        let persistence = TourPersistence::new(storage.clone(), "tour", false);
        persistence.save_record([0], 0);
        persistence.mark_completed("intro");
        assert!(storage.is_empty());
        assert!(!persistence.is_completed("intro"));
    }
}
