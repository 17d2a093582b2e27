//! Per-category submission schemas.

use counselor_core::types::{RecordCategory, RecordDraft};

/// Programs offered on the admission inquiry form.
pub const PROGRAMS: [&str; 3] = ["AI & ML", "CS", "ECE"];

/// Criteria a feedback submission can rate, in display order.
pub const FEEDBACK_CRITERIA: [&str; 4] = ["staff", "hospitality", "campus", "first"];

const RESERVED_KEY: &str = "created_at";

/// A submission that does not satisfy its category schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(String),
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("unknown program: {0}")]
    UnknownProgram(String),
    #[error("unknown rating criterion: {0}")]
    UnknownCriterion(String),
    #[error("rating for {criterion} must be between 1 and 5, got {stars}")]
    RatingOutOfRange { criterion: String, stars: u8 },
    #[error("{0} submissions do not take ratings")]
    RatingsNotAccepted(RecordCategory),
    #[error("field name '{0}' is reserved")]
    ReservedField(String),
    #[error("feedback needs at least one rating or a comment")]
    EmptyFeedback,
}

/// Validate a draft against its category schema and return the normalized
/// draft that should be stored.
///
/// Field values are trimmed. Ratings of `0` mean "not rated" and are dropped.
pub fn validate(category: RecordCategory, draft: RecordDraft) -> Result<RecordDraft, ValidationError> {
    let mut draft = draft;
    for value in draft.fields.values_mut() {
        *value = value.trim().to_string();
    }
    draft.ratings.retain(|_, stars| *stars != 0);

    for key in draft.fields.keys().chain(draft.ratings.keys()) {
        if key == RESERVED_KEY {
            return Err(ValidationError::ReservedField(key.clone()));
        }
    }

    match category {
        RecordCategory::Admission => validate_admission(draft),
        RecordCategory::Feedback => validate_feedback(draft),
    }
}

fn validate_admission(mut draft: RecordDraft) -> Result<RecordDraft, ValidationError> {
    if !draft.ratings.is_empty() {
        return Err(ValidationError::RatingsNotAccepted(RecordCategory::Admission));
    }

    for required in ["name", "email"] {
        if draft.fields.get(required).map_or(true, |v| v.is_empty()) {
            return Err(ValidationError::MissingField(required.to_string()));
        }
    }

    let email = draft.fields.get("email").map(String::as_str).unwrap_or_default();
    if !looks_like_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }

    let program = draft.fields.get("program").cloned().unwrap_or_default();
    if program.is_empty() {
        draft.fields.insert("program".to_string(), PROGRAMS[0].to_string());
    } else if !PROGRAMS.contains(&program.as_str()) {
        return Err(ValidationError::UnknownProgram(program));
    }

    Ok(draft)
}

fn validate_feedback(draft: RecordDraft) -> Result<RecordDraft, ValidationError> {
    for (criterion, stars) in &draft.ratings {
        if !FEEDBACK_CRITERIA.contains(&criterion.as_str()) {
            return Err(ValidationError::UnknownCriterion(criterion.clone()));
        }
        if !(1..=5).contains(stars) {
            return Err(ValidationError::RatingOutOfRange {
                criterion: criterion.clone(),
                stars: *stars,
            });
        }
    }

    // Flat persistence shares one namespace between fields and ratings.
    for key in draft.fields.keys() {
        if FEEDBACK_CRITERIA.contains(&key.as_str()) {
            return Err(ValidationError::ReservedField(key.clone()));
        }
    }

    let has_comment = draft.fields.get("text").is_some_and(|t| !t.is_empty());
    if draft.ratings.is_empty() && !has_comment {
        return Err(ValidationError::EmptyFeedback);
    }

    Ok(draft)
}

/// Same shape check a browser applies to `type=email` inputs: a non-empty
/// local part and domain around a single `@`, no whitespace.
fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !s.chars().any(char::is_whitespace)
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
