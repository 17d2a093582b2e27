//! Record store behaviour against the on-disk SQLite backend.

use std::sync::Arc;

use counselor_core::types::{RecordCategory, RecordDraft};
use counselor_storage::{Database, RecordStore, SqliteStore, StoreError, ValidationError};

fn open(path: &std::path::Path) -> RecordStore {
    let db = Arc::new(Database::new(path).unwrap());
    RecordStore::new(Arc::new(SqliteStore::new(db)))
}

#[test]
fn records_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");

    {
        let store = open(&path);
        store
            .append(
                RecordCategory::Admission,
                RecordDraft::new()
                    .field("name", "Asha Rao")
                    .field("email", "asha@example.com")
                    .field("program", "ECE"),
            )
            .unwrap();
        store
            .append(
                RecordCategory::Feedback,
                RecordDraft::new()
                    .rating("staff", 5)
                    .rating("first", 4)
                    .field("text", "Very welcoming"),
            )
            .unwrap();
    }

    let store = open(&path);
    let admissions = store.load(RecordCategory::Admission).unwrap();
    assert_eq!(admissions.len(), 1);
    assert_eq!(admissions[0].field("program"), Some("ECE"));

    let feedback = store.load(RecordCategory::Feedback).unwrap();
    assert_eq!(feedback.len(), 1);
    let ratings = feedback[0].ratings.as_ref().unwrap();
    assert_eq!(ratings["staff"], 5);
    assert_eq!(ratings["first"], 4);
}

#[test]
fn append_round_trips_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("records.db"));

    let draft = RecordDraft::new()
        .field("name", "Ravi")
        .field("email", "ravi@example.in")
        .field("program", "AI & ML")
        .field("msg", "What is the fee structure?");
    let stored = store.append(RecordCategory::Admission, draft.clone()).unwrap();

    let loaded = store.load(RecordCategory::Admission).unwrap();
    let last = loaded.last().unwrap();
    assert_eq!(last.fields, draft.fields);
    assert_eq!(last.created_at, stored.created_at);
}

#[test]
fn rejected_inquiry_leaves_sqlite_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("records.db"));

    let result = store.append(
        RecordCategory::Admission,
        RecordDraft::new().field("name", "").field("email", "a@b.com"),
    );
    assert!(matches!(
        result,
        Err(StoreError::Rejected(ValidationError::MissingField(_)))
    ));
    assert!(store.load(RecordCategory::Admission).unwrap().is_empty());
}

#[test]
fn load_twice_without_append_is_equal() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir.path().join("records.db"));
    store
        .append(RecordCategory::Feedback, RecordDraft::new().rating("campus", 2))
        .unwrap();

    assert_eq!(
        store.load(RecordCategory::Feedback).unwrap(),
        store.load(RecordCategory::Feedback).unwrap()
    );
}
