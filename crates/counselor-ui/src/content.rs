//! Static page content that does not come from the facts table.

/// Places listed on the campus map, with directions.
pub const CAMPUS_SPOTS: &[(&str, &str)] = &[
    ("Admissions Office", "Ground Floor – Admin Block"),
    ("HOD (AI&ML) Cabin", "Block C – 2nd Floor"),
    ("Main Library", "Block B – 1st Floor"),
    ("Canteen", "Near Central Courtyard"),
    ("Prayer Room", "Block A – Ground"),
    ("Sports Facilities", "Behind Block D"),
    ("Accounts Section", "Admin Block – 1st Floor"),
    ("Washroom", "Every floor – near stairwell"),
    ("Hostels", "Boys (North Wing), Girls (South Wing)"),
];

pub const KNOWLEDGE_ITEMS: &[&str] = &[
    "Admissions: CET/COMEDK/Management; scholarships and loan guidance.",
    "AI & ML: Strong curriculum, modern labs, projects, hackathons.",
    "Events & Workshops: Tech talks, coding marathons, industry sessions.",
];

/// A faculty card on the staff page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffMember {
    pub name: &'static str,
    pub role: &'static str,
    pub subjects: &'static str,
    pub expertise: &'static str,
    pub photo: &'static str,
}

/// Faculty shown after the head of department.
pub const STAFF: &[StaffMember] = &[
    StaffMember {
        name: "Prof. B. Example",
        role: "Professor",
        subjects: "DSA, Python",
        expertise: "Systems",
        photo: "https://placehold.co/120",
    },
    StaffMember {
        name: "Ms. C. Example",
        role: "Assistant Professor",
        subjects: "DBMS, Big Data",
        expertise: "Data Eng",
        photo: "https://placehold.co/120",
    },
];

pub const HOD_SUBJECTS: &str = "ML, DL";
pub const HOD_EXPERTISE: &str = "Vision, NLP";

pub const GALLERY_ITEMS: &[(&str, &str)] = &[
    ("Student Trophies", "https://placehold.co/400x220?text=Trophies"),
    ("Major Projects", "https://placehold.co/400x220?text=Projects"),
    ("AI & ML Labs", "https://placehold.co/400x220?text=Labs"),
];

/// Display label for each feedback criterion.
pub fn criterion_label(criterion: &str) -> &str {
    match criterion {
        "staff" => "Staff",
        "hospitality" => "Hospitality",
        "campus" => "Campus",
        "first" => "First Experience",
        other => other,
    }
}

/// Home-page shortcuts that ask a fixed question.
pub const QUICK_QUESTIONS: &[(&str, &str, &str)] = &[
    ("quick-admissions", "AI&ML Admissions", "Tell me about AI & ML admissions"),
    ("quick-placements", "Placements", "Placement records"),
];

pub const FOCUS_ROLES: &str = "AI/ML, Data, Cloud, Full-stack roles";

pub const VOICE_NOTE_TEXT: &str = "Recording is demo only; not stored on a server.";
pub const INQUIRY_SAVED_NOTICE: &str = "Thanks! Saved locally (demo).";
pub const FEEDBACK_SAVED_NOTICE: &str = "Thanks for the feedback!";
