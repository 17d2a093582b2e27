//! Ordered keyword rules that map a question to an informational intent.
//!
//! Rules are evaluated top to bottom and the first match wins, so the order
//! of [`RULES`] is the tie-break when a question mentions several topics.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use counselor_core::types::Facts;

/// Category of a user question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Admissions,
    Placements,
    Faculty,
    Campus,
    /// Catch-all; always matches.
    Default,
}

impl Intent {
    /// Every intent in evaluation order.
    pub const ORDER: [Intent; 5] = [
        Intent::Admissions,
        Intent::Placements,
        Intent::Faculty,
        Intent::Campus,
        Intent::Default,
    ];

    /// Reply text for this intent, filled from `facts`.
    pub fn reply(&self, facts: &Facts) -> String {
        match self {
            Intent::Admissions => "Admissions for AI & ML consider CET, COMEDK, and Management \
                                   quota. Scholarships and education-loan guidance are available."
                .to_string(),
            Intent::Placements => format!(
                "Placements are strong — {}% in 2023 with highest package {}. In 2022–23: about \
                 {} offers, {} students placed, and {} companies visited.",
                facts.placement_rate,
                facts.highest_package,
                facts.offers_2023,
                facts.placed_2023,
                facts.companies_2023
            ),
            Intent::Faculty => format!(
                "AI-ML HoD is {}. Contact: {}.",
                facts.hod.name, facts.hod.email
            ),
            Intent::Campus => "See Campus Map for directions to Admissions Office, HoD AI-ML \
                               cabin, Library, Canteen, Prayer Room, Sports, Accounts, and Hostels."
                .to_string(),
            Intent::Default => format!(
                "Great question! AI-ML has modern labs and a vibrant campus life with {}% \
                 placements and highest {}.",
                facts.placement_rate, facts.highest_package
            ),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Admissions => "admissions",
            Intent::Placements => "placements",
            Intent::Faculty => "faculty",
            Intent::Campus => "campus",
            Intent::Default => "default",
        };
        write!(f, "{}", name)
    }
}

/// A matcher bound to the intent it selects.
struct IntentRule {
    intent: Intent,
    pattern: Regex,
}

// Keywords are substrings on purpose: "eligib" covers eligible/eligibility.
// "fee" is the one whole word, so "feedback" stays out of admissions.
static RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    let rule = |intent, pat: &str| IntentRule {
        intent,
        pattern: Regex::new(pat).expect("Invalid intent regex"),
    };

    vec![
        rule(Intent::Admissions, r"(?i)admission|apply|eligib|quota|\bfees?\b|scholar"),
        rule(Intent::Placements, r"(?i)placement|package|salary|recruit|job"),
        rule(Intent::Faculty, r"(?i)hod|head|professor|faculty|staff"),
        rule(Intent::Campus, r"(?i)map|campus|where|library|canteen|hostel|office"),
    ]
});

/// Case-fold and collapse whitespace.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify already-normalized text. Falls back to [`Intent::Default`].
pub fn classify_normalized(text: &str) -> Intent {
    RULES
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str) -> Intent {
        classify_normalized(&normalize(raw))
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  What ARE\tthe   Placements? "), "what are the placements?");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_admissions_keywords() {
        assert_eq!(classify("What is the eligibility?"), Intent::Admissions);
        assert_eq!(classify("Any scholarship options?"), Intent::Admissions);
        assert_eq!(classify("How do I apply"), Intent::Admissions);
        assert_eq!(classify("COMEDK quota seats"), Intent::Admissions);
        assert_eq!(classify("fees please"), Intent::Admissions);
        assert_eq!(classify("What is the fee structure?"), Intent::Admissions);
    }

    #[test]
    fn test_feedback_is_not_an_admissions_question() {
        assert_eq!(classify("How do I give feedback?"), Intent::Default);
        assert_eq!(classify("How do I give feedback about the canteen?"), Intent::Campus);
        assert_eq!(classify("Feedback on the staff"), Intent::Faculty);
    }

    #[test]
    fn test_placements_keywords() {
        assert_eq!(classify("What are the placements like?"), Intent::Placements);
        assert_eq!(classify("average SALARY"), Intent::Placements);
        assert_eq!(classify("top recruiters"), Intent::Placements);
        assert_eq!(classify("will I get a job"), Intent::Placements);
    }

    #[test]
    fn test_faculty_keywords() {
        assert_eq!(classify("Who is the HOD?"), Intent::Faculty);
        assert_eq!(classify("tell me about the professors"), Intent::Faculty);
        assert_eq!(classify("teaching staff"), Intent::Faculty);
    }

    #[test]
    fn test_campus_keywords() {
        assert_eq!(classify("Where is the library?"), Intent::Campus);
        assert_eq!(classify("hostel rooms"), Intent::Campus);
        assert_eq!(classify("show me the map"), Intent::Campus);
    }

    #[test]
    fn test_unmatched_falls_back_to_default() {
        assert_eq!(classify("hello"), Intent::Default);
        assert_eq!(classify("tell me something nice"), Intent::Default);
        assert_eq!(classify(""), Intent::Default);
    }

    #[test]
    fn test_earlier_rule_wins_on_overlap() {
        // Placements is declared before Faculty.
        assert_eq!(
            classify("what package does the HOD placement team offer"),
            Intent::Placements
        );
        // Admissions is declared before Campus.
        assert_eq!(classify("where is the admission office"), Intent::Admissions);
        // Faculty is declared before Campus.
        assert_eq!(classify("where does the professor sit"), Intent::Faculty);
    }

    #[test]
    fn test_admissions_beats_every_other_topic() {
        assert_eq!(
            classify("scholarship for placement-focused faculty on campus"),
            Intent::Admissions
        );
    }

    #[test]
    fn test_declared_order_is_pinned() {
        let rule_order: Vec<Intent> = RULES.iter().map(|r| r.intent).collect();
        assert_eq!(rule_order, &Intent::ORDER[..4]);
        assert_eq!(Intent::ORDER.last(), Some(&Intent::Default));
    }

    #[test]
    fn test_placement_reply_uses_facts_verbatim() {
        let reply = Intent::Placements.reply(&Facts::default());
        assert!(reply.contains("94.3%"));
        assert!(reply.contains("₹32.4 LPA"));
        assert!(reply.contains("1100 offers"));
        assert!(reply.contains("618 students placed"));
        assert!(reply.contains("242 companies"));
    }

    #[test]
    fn test_faculty_reply_uses_hod() {
        let reply = Intent::Faculty.reply(&Facts::default());
        assert_eq!(
            reply,
            "AI-ML HoD is Dr. Tabassum Ara. Contact: hod.aiml@hkbk.edu.in."
        );
    }

    #[test]
    fn test_default_reply_references_facts() {
        let mut facts = Facts::default();
        facts.placement_rate = 97.0;
        facts.highest_package = "₹50 LPA".to_string();
        let reply = Intent::Default.reply(&facts);
        assert!(reply.starts_with("Great question!"));
        assert!(reply.contains("97% placements"));
        assert!(reply.contains("highest ₹50 LPA"));
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::Admissions.to_string(), "admissions");
        assert_eq!(Intent::Default.to_string(), "default");
    }
}
