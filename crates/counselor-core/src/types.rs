use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CounselorError, Result};

// =============================================================================
// Facts
// =============================================================================

/// Head of department shown on the staff page and in faculty replies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadOfDepartment {
    pub name: String,
    pub role: String,
    pub email: String,
}

impl Default for HeadOfDepartment {
    fn default() -> Self {
        Self {
            name: "Dr. Tabassum Ara".to_string(),
            role: "Professor & HoD, AI-ML".to_string(),
            email: "hod.aiml@hkbk.edu.in".to_string(),
        }
    }
}

/// Institutional statistics used by replies, stat lists, and charts.
///
/// Loaded once from the `[facts]` config section and shared read-only for
/// the lifetime of the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Facts {
    /// Display string, currency included (e.g. `₹32.4 LPA`).
    pub highest_package: String,
    /// Percentage of students placed, without the `%` sign.
    pub placement_rate: f64,
    /// Display string (e.g. `375+`).
    pub recruiters: String,
    pub offers_2023: u32,
    pub placed_2023: u32,
    pub companies_2023: u32,
    pub hod: HeadOfDepartment,
}

impl Default for Facts {
    fn default() -> Self {
        Self {
            highest_package: "₹32.4 LPA".to_string(),
            placement_rate: 94.3,
            recruiters: "375+".to_string(),
            offers_2023: 1100,
            placed_2023: 618,
            companies_2023: 242,
            hod: HeadOfDepartment::default(),
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Identifier of a navigable view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Admissions,
    Placements,
    CampusMap,
    Knowledge,
    Staff,
    Gallery,
    Feedback,
    NotFound,
}

impl Route {
    /// Every route reachable from a path, in navigation-bar order.
    pub const KNOWN: [Route; 8] = [
        Route::Home,
        Route::Admissions,
        Route::Placements,
        Route::CampusMap,
        Route::Knowledge,
        Route::Staff,
        Route::Gallery,
        Route::Feedback,
    ];

    /// Resolve a path such as `/placements`. Unknown paths map to `NotFound`.
    pub fn from_path(path: &str) -> Route {
        match path {
            "/" => Route::Home,
            "/admissions" => Route::Admissions,
            "/placements" => Route::Placements,
            "/campus" => Route::CampusMap,
            "/knowledge" => Route::Knowledge,
            "/staff" => Route::Staff,
            "/gallery" => Route::Gallery,
            "/feedback" => Route::Feedback,
            _ => Route::NotFound,
        }
    }

    /// The canonical path, or `None` for `NotFound`.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Route::Home => Some("/"),
            Route::Admissions => Some("/admissions"),
            Route::Placements => Some("/placements"),
            Route::CampusMap => Some("/campus"),
            Route::Knowledge => Some("/knowledge"),
            Route::Staff => Some("/staff"),
            Route::Gallery => Some("/gallery"),
            Route::Feedback => Some("/feedback"),
            Route::NotFound => None,
        }
    }

    /// Label used on navigation pills.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Admissions => "Admissions",
            Route::Placements => "Placements",
            Route::CampusMap => "Campus map",
            Route::Knowledge => "Knowledge",
            Route::Staff => "Staff",
            Route::Gallery => "Gallery",
            Route::Feedback => "Feedback",
            Route::NotFound => "Not found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Conversation
// =============================================================================

/// Author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Short badge shown next to each message in the chat stream.
    pub fn badge(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "AI",
        }
    }
}

/// One message in the in-memory chat history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Category of a persisted submission. Each category has its own storage key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    Admission,
    Feedback,
}

impl RecordCategory {
    /// Key under which the category's sequence is persisted.
    pub fn storage_key(&self) -> &'static str {
        match self {
            RecordCategory::Admission => "admissions",
            RecordCategory::Feedback => "feedback",
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

/// A submission before it is validated and stamped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordDraft {
    pub fields: BTreeMap<String, String>,
    pub ratings: BTreeMap<String, u8>,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn rating(mut self, criterion: impl Into<String>, stars: u8) -> Self {
        self.ratings.insert(criterion.into(), stars);
        self
    }
}

/// A persisted, immutable submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub category: RecordCategory,
    pub fields: BTreeMap<String, String>,
    /// Criterion to 1-5 stars. `None` when the submission carried no ratings.
    pub ratings: Option<BTreeMap<String, u8>>,
    pub created_at: DateTime<Utc>,
}

const CREATED_AT: &str = "created_at";

impl Record {
    /// Flatten into the persisted object shape: string fields, integer
    /// ratings, and an RFC 3339 `created_at`.
    pub fn to_flat(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (k, v) in &self.fields {
            obj.insert(k.clone(), serde_json::Value::String(v.clone()));
        }
        if let Some(ratings) = &self.ratings {
            for (k, v) in ratings {
                obj.insert(k.clone(), serde_json::Value::from(*v));
            }
        }
        obj.insert(
            CREATED_AT.to_string(),
            serde_json::Value::String(self.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        );
        serde_json::Value::Object(obj)
    }

    /// Rebuild a record from its persisted object shape.
    ///
    /// A rating of `0` means "not rated" and is dropped.
    pub fn from_flat(category: RecordCategory, value: &serde_json::Value) -> Result<Record> {
        let obj = value.as_object().ok_or_else(|| {
            CounselorError::Serialization(format!("{} entry is not an object", category))
        })?;

        let mut fields = BTreeMap::new();
        let mut ratings = BTreeMap::new();
        let mut created_at = None;

        for (key, val) in obj {
            if key == CREATED_AT {
                let raw = val.as_str().ok_or_else(|| {
                    CounselorError::Serialization("created_at is not a string".to_string())
                })?;
                let parsed = DateTime::parse_from_rfc3339(raw)
                    .map_err(|e| CounselorError::Serialization(format!("created_at: {}", e)))?;
                created_at = Some(parsed.with_timezone(&Utc));
                continue;
            }
            match val {
                serde_json::Value::String(s) => {
                    fields.insert(key.clone(), s.clone());
                }
                serde_json::Value::Number(n) => {
                    let stars = n
                        .as_u64()
                        .and_then(|v| u8::try_from(v).ok())
                        .ok_or_else(|| {
                            CounselorError::Serialization(format!("rating {} is not a star count", key))
                        })?;
                    if stars > 0 {
                        ratings.insert(key.clone(), stars);
                    }
                }
                serde_json::Value::Null => {}
                other => {
                    return Err(CounselorError::Serialization(format!(
                        "unsupported value for {}: {}",
                        key, other
                    )))
                }
            }
        }

        let created_at = created_at
            .ok_or_else(|| CounselorError::Serialization("missing created_at".to_string()))?;

        Ok(Record {
            category,
            fields,
            ratings: if ratings.is_empty() { None } else { Some(ratings) },
            created_at,
        })
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_facts() {
        let facts = Facts::default();
        assert_eq!(facts.highest_package, "₹32.4 LPA");
        assert_eq!(facts.placement_rate, 94.3);
        assert_eq!(facts.offers_2023, 1100);
        assert_eq!(facts.hod.email, "hod.aiml@hkbk.edu.in");
    }

    #[test]
    fn test_route_paths_round_trip() {
        for route in Route::KNOWN {
            let path = route.path().unwrap();
            assert_eq!(Route::from_path(path), route);
        }
        assert_eq!(Route::NotFound.path(), None);
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        assert_eq!(Route::from_path("/xyz"), Route::NotFound);
        assert_eq!(Route::from_path(""), Route::NotFound);
        assert_eq!(Route::from_path("/Placements"), Route::NotFound);
        assert_eq!(Route::from_path("/campus/"), Route::NotFound);
    }

    #[test]
    fn test_role_badges() {
        assert_eq!(Role::User.badge(), "USER");
        assert_eq!(Role::Assistant.badge(), "AI");
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(RecordCategory::Admission.storage_key(), "admissions");
        assert_eq!(RecordCategory::Feedback.storage_key(), "feedback");
        assert_eq!(RecordCategory::Feedback.to_string(), "feedback");
    }

    #[test]
    fn test_flat_shape_for_feedback() {
        let record = Record {
            category: RecordCategory::Feedback,
            fields: BTreeMap::from([("text".to_string(), "Lovely campus".to_string())]),
            ratings: Some(BTreeMap::from([("staff".to_string(), 5)])),
            created_at: Utc::now(),
        };
        let flat = record.to_flat();
        assert_eq!(flat["text"], "Lovely campus");
        assert_eq!(flat["staff"], 5);
        assert!(flat["created_at"].is_string());

        let back = Record::from_flat(RecordCategory::Feedback, &flat).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_from_flat_drops_unrated_criteria() {
        let value = serde_json::json!({
            "staff": 0,
            "hospitality": 0,
            "campus": 3,
            "first": 0,
            "text": "",
            "created_at": "2025-01-05T10:00:00.000Z"
        });
        let record = Record::from_flat(RecordCategory::Feedback, &value).unwrap();
        let ratings = record.ratings.unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings["campus"], 3);
    }

    #[test]
    fn test_from_flat_rejects_missing_timestamp() {
        let value = serde_json::json!({ "name": "Asha" });
        assert!(Record::from_flat(RecordCategory::Admission, &value).is_err());
    }

    #[test]
    fn test_from_flat_rejects_non_object() {
        let value = serde_json::json!(["not", "an", "object"]);
        assert!(Record::from_flat(RecordCategory::Admission, &value).is_err());
    }
}
