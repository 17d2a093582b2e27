//! Append-only record sequences, one per category.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info, warn};

use counselor_core::error::CounselorError;
use counselor_core::types::{Record, RecordCategory, RecordDraft};

use crate::backend::KeyValueStore;
use crate::error::StoreError;
use crate::validation;

/// Validated, append-only persistence of submissions.
///
/// There is no update or delete: a category's sequence only ever grows, in
/// submission order, and `created_at` never decreases along it.
pub struct RecordStore {
    backend: Arc<dyn KeyValueStore>,
    append_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            append_lock: Mutex::new(()),
        }
    }

    /// Validate `draft` and append it to the category's sequence.
    ///
    /// On rejection nothing is written and the reason is returned as
    /// [`StoreError::Rejected`].
    pub fn append(&self, category: RecordCategory, draft: RecordDraft) -> Result<Record, StoreError> {
        let draft = match validation::validate(category, draft) {
            Ok(d) => d,
            Err(e) => {
                debug!(category = %category, reason = %e, "Submission rejected");
                return Err(e.into());
            }
        };

        let _guard = self
            .append_lock
            .lock()
            .map_err(|e| CounselorError::Storage(format!("Append lock poisoned: {}", e)))?;

        let mut entries = self.read_entries(category)?;

        let now = Utc::now();
        let created_at = match entries.last() {
            Some(last) => {
                let last = Record::from_flat(category, last)?;
                last.created_at.max(now)
            }
            None => now,
        };

        let record = Record {
            category,
            fields: draft.fields,
            ratings: if draft.ratings.is_empty() {
                None
            } else {
                Some(draft.ratings)
            },
            created_at,
        };

        entries.push(record.to_flat());
        let blob = serde_json::to_string(&entries).map_err(CounselorError::from)?;
        self.backend.set(category.storage_key(), &blob)?;

        info!(category = %category, total = entries.len(), "Record stored");
        Ok(record)
    }

    /// Full history for a category in insertion order. Empty when nothing has
    /// been stored yet.
    pub fn load(&self, category: RecordCategory) -> Result<Vec<Record>, StoreError> {
        let entries = self.read_entries(category)?;
        let records = entries
            .iter()
            .map(|entry| Record::from_flat(category, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Number of stored records in a category.
    pub fn count(&self, category: RecordCategory) -> Result<usize, StoreError> {
        Ok(self.read_entries(category)?.len())
    }

    fn read_entries(&self, category: RecordCategory) -> Result<Vec<serde_json::Value>, CounselorError> {
        let key = category.storage_key();
        match self.backend.get(key)? {
            None => Ok(Vec::new()),
            Some(blob) if blob.trim().is_empty() => Ok(Vec::new()),
            Some(blob) => serde_json::from_str(&blob).map_err(|e| {
                warn!(key, error = %e, "Stored record array is unreadable");
                CounselorError::from(e)
            }),
        }
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use crate::validation::ValidationError;

    fn store() -> (Arc<MemoryStore>, RecordStore) {
        let backend = Arc::new(MemoryStore::new());
        let store = RecordStore::new(backend.clone());
        (backend, store)
    }

    fn inquiry(name: &str) -> RecordDraft {
        RecordDraft::new()
            .field("name", name)
            .field("email", "student@example.com")
            .field("program", "AI & ML")
            .field("msg", "")
    }

    #[test]
    fn test_load_empty_category() {
        let (_, store) = store();
        assert!(store.load(RecordCategory::Admission).unwrap().is_empty());
        assert!(store.load(RecordCategory::Feedback).unwrap().is_empty());
        assert_eq!(store.count(RecordCategory::Feedback).unwrap(), 0);
    }

    #[test]
    fn test_append_then_load_last_matches() {
        let (_, store) = store();
        let draft = inquiry("Asha");
        let stored = store.append(RecordCategory::Admission, draft.clone()).unwrap();

        let loaded = store.load(RecordCategory::Admission).unwrap();
        let last = loaded.last().unwrap();
        assert_eq!(last.fields, draft.fields);
        assert_eq!(last.ratings, None);
        assert_eq!(last, &stored);
    }

    #[test]
    fn test_load_is_idempotent() {
        let (_, store) = store();
        store.append(RecordCategory::Admission, inquiry("Asha")).unwrap();
        store.append(RecordCategory::Admission, inquiry("Ravi")).unwrap();
        let first = store.load(RecordCategory::Admission).unwrap();
        let second = store.load(RecordCategory::Admission).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejected_append_stores_nothing() {
        let (backend, store) = store();
        store.append(RecordCategory::Admission, inquiry("Asha")).unwrap();
        let before = backend.get("admissions").unwrap();

        let err = store
            .append(RecordCategory::Admission, inquiry(""))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Rejected(ValidationError::MissingField(ref f)) if f == "name"
        ));
        assert_eq!(backend.get("admissions").unwrap(), before);
        assert_eq!(store.load(RecordCategory::Admission).unwrap().len(), 1);
    }

    #[test]
    fn test_categories_are_independent() {
        let (_, store) = store();
        store.append(RecordCategory::Admission, inquiry("Asha")).unwrap();
        store
            .append(
                RecordCategory::Feedback,
                RecordDraft::new().rating("staff", 5).field("text", "Helpful"),
            )
            .unwrap();
        assert_eq!(store.count(RecordCategory::Admission).unwrap(), 1);
        assert_eq!(store.count(RecordCategory::Feedback).unwrap(), 1);
        let feedback = store.load(RecordCategory::Feedback).unwrap();
        assert_eq!(feedback[0].ratings.as_ref().unwrap()["staff"], 5);
        assert_eq!(feedback[0].field("text"), Some("Helpful"));
    }

    #[test]
    fn test_created_at_is_non_decreasing() {
        let (_, store) = store();
        for i in 0..20 {
            store
                .append(RecordCategory::Admission, inquiry(&format!("Student {i}")))
                .unwrap();
        }
        let records = store.load(RecordCategory::Admission).unwrap();
        assert_eq!(records.len(), 20);
        for pair in records.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
        assert_eq!(records[0].field("name"), Some("Student 0"));
        assert_eq!(records[19].field("name"), Some("Student 19"));
    }

    #[test]
    fn test_created_at_never_precedes_last_entry() {
        let (backend, store) = store();
        let future = Utc::now() + chrono::Duration::hours(1);
        let seeded = serde_json::json!([{
            "name": "From the future",
            "email": "f@example.com",
            "created_at": future.to_rfc3339()
        }]);
        backend.set("admissions", &seeded.to_string()).unwrap();

        let stored = store.append(RecordCategory::Admission, inquiry("Asha")).unwrap();
        assert!(stored.created_at >= future);
    }

    #[test]
    fn test_reads_legacy_browser_shape() {
        let (backend, store) = store();
        backend
            .set(
                "feedback",
                r#"[{"staff":4,"hospitality":0,"campus":5,"first":0,"text":"Nice","created_at":"2025-02-01T09:30:00.000Z"}]"#,
            )
            .unwrap();
        let records = store.load(RecordCategory::Feedback).unwrap();
        assert_eq!(records.len(), 1);
        let ratings = records[0].ratings.as_ref().unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(records[0].field("text"), Some("Nice"));
    }

    #[test]
    fn test_corrupt_blob_is_backend_error() {
        let (backend, store) = store();
        backend.set("admissions", "{not json").unwrap();
        let err = store.load(RecordCategory::Admission).unwrap_err();
        assert!(matches!(err, StoreError::Backend(CounselorError::Serialization(_))));
    }

    #[test]
    fn test_persisted_shape_is_flat_array() {
        let (backend, store) = store();
        store
            .append(RecordCategory::Feedback, RecordDraft::new().rating("campus", 3))
            .unwrap();
        let blob = backend.get("feedback").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["campus"], 3);
        assert!(entries[0]["created_at"].is_string());
    }
}
