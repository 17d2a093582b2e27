//! One pure view function per route.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use counselor_core::types::{ConversationTurn, Facts, Route};
use counselor_storage::{FEEDBACK_CRITERIA, PROGRAMS};

use crate::charts::{BarChart, PieChart};
use crate::content;
use crate::shell;
use crate::view::{Action, Bindings, InputKind, Node, View};

pub const QUESTION_FIELD: &str = "question";
pub const FEEDBACK_TEXT_FIELD: &str = "text";
pub const ADMISSION_FIELDS: [&str; 4] = ["name", "email", "program", "msg"];

/// Transient inputs owned by the current view. Reset on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub inputs: BTreeMap<String, String>,
    pub ratings: BTreeMap<String, u8>,
}

impl ViewState {
    pub fn input(&self, field: &str) -> &str {
        self.inputs.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn rating(&self, criterion: &str) -> u8 {
        self.ratings.get(criterion).copied().unwrap_or(0)
    }
}

/// Everything a view is computed from.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub brand: &'a str,
    pub assistant_name: &'a str,
    pub facts: &'a Facts,
    pub conversation: &'a [ConversationTurn],
    pub admissions_saved: usize,
    pub feedback_saved: usize,
    pub state: &'a ViewState,
    pub now: NaiveDateTime,
}

pub fn render(route: Route, ctx: &ViewContext<'_>) -> View {
    let mut bindings = Bindings::new();
    let tagline = format!("{} • Counselor assistant", ctx.assistant_name);
    let shell = shell::build(ctx.brand, &tagline, route, ctx.now, &mut bindings);

    let content = match route {
        Route::Home => home(ctx, &mut bindings),
        Route::Admissions => admissions(ctx, &mut bindings),
        Route::Placements => placements(ctx),
        Route::CampusMap => campus_map(),
        Route::Knowledge => knowledge(),
        Route::Staff => staff(ctx),
        Route::Gallery => gallery(),
        Route::Feedback => feedback(ctx, &mut bindings),
        Route::NotFound => not_found(),
    };

    View {
        route,
        shell,
        content,
        bindings: bindings.into_vec(),
    }
}

fn home(ctx: &ViewContext<'_>, bindings: &mut Bindings) -> Vec<Node> {
    let mut chat = vec![
        Node::heading(1, "Chat"),
        Node::muted("Human-first counselor. Ask anything and I'll keep it short & helpful."),
    ];
    chat.extend(ctx.conversation.iter().map(|turn| Node::Message {
        badge: turn.role.badge(),
        text: turn.text.clone(),
    }));
    chat.push(Node::Row(vec![
        Node::Input {
            field: QUESTION_FIELD.to_string(),
            label: "Type your question…".to_string(),
            kind: InputKind::Text,
            value: ctx.state.input(QUESTION_FIELD).to_string(),
            required: false,
        },
        bindings.button("ask", "Ask", Action::Ask),
        bindings.button("listen", "🎤 Voice", Action::Listen),
    ]));

    let mut quick: Vec<Node> = content::QUICK_QUESTIONS
        .iter()
        .map(|(id, label, question)| bindings.button(*id, *label, Action::AskPreset(question.to_string())))
        .collect();
    quick.push(bindings.button("quick-campus", "Campus Map", Action::Navigate("/campus".to_string())));

    vec![Node::Grid {
        columns: 2,
        children: vec![
            Node::Card(chat),
            Node::Card(vec![Node::heading(1, "Quick actions"), Node::Row(quick)]),
        ],
    }]
}

fn admissions(ctx: &ViewContext<'_>, bindings: &mut Bindings) -> Vec<Node> {
    let input = |field: &str, label: &str, kind: InputKind, required: bool| Node::Input {
        field: field.to_string(),
        label: label.to_string(),
        kind,
        value: ctx.state.input(field).to_string(),
        required,
    };
    let selected = match ctx.state.input("program") {
        "" => PROGRAMS[0].to_string(),
        program => program.to_string(),
    };

    vec![Node::Card(vec![
        Node::heading(1, "Admissions: AI & ML"),
        Node::muted("Eligibility via CET/COMEDK/Management. Scholarships + education loan guidance available."),
        input("name", "Name", InputKind::Text, true),
        input("email", "Email", InputKind::Email, true),
        Node::Select {
            field: "program".to_string(),
            label: "Program".to_string(),
            options: PROGRAMS.iter().map(|p| p.to_string()).collect(),
            selected,
        },
        input("msg", "Question", InputKind::TextArea, false),
        bindings.button("submit-inquiry", "Submit Inquiry", Action::SubmitAdmission),
        Node::muted(format!("{} inquiries saved on this device.", ctx.admissions_saved)),
    ])]
}

fn placements(ctx: &ViewContext<'_>) -> Vec<Node> {
    let facts = ctx.facts;
    vec![
        Node::Card(vec![
            Node::heading(1, "Placements Snapshot"),
            Node::List(vec![
                format!("Highest Package: {}", facts.highest_package),
                format!("Overall Placements: {}% (2023)", facts.placement_rate),
                format!("Recruiters: {}", facts.recruiters),
                format!("Focus: {}", content::FOCUS_ROLES),
            ]),
        ]),
        Node::Grid {
            columns: 2,
            children: vec![
                Node::Card(vec![
                    Node::heading(2, "2022–23 at a glance"),
                    Node::BarChart(BarChart::placement_counts(facts)),
                ]),
                Node::Card(vec![
                    Node::heading(2, "Placement rate"),
                    Node::PieChart(PieChart::placed(facts.placement_rate)),
                ]),
            ],
        },
    ]
}

fn campus_map() -> Vec<Node> {
    vec![Node::Grid {
        columns: 3,
        children: content::CAMPUS_SPOTS
            .iter()
            .map(|(name, directions)| Node::Card(vec![Node::heading(2, *name), Node::muted(*directions)]))
            .collect(),
    }]
}

fn knowledge() -> Vec<Node> {
    vec![Node::Card(vec![
        Node::heading(1, "Knowledge Base"),
        Node::List(content::KNOWLEDGE_ITEMS.iter().map(|s| s.to_string()).collect()),
    ])]
}

fn staff_card(name: &str, role: &str, subjects: &str, expertise: &str, photo: &str, contact: Option<&str>) -> Node {
    let mut card = vec![
        Node::Image {
            src: photo.to_string(),
            alt: name.to_string(),
        },
        Node::heading(2, name),
        Node::muted(role),
        Node::text(format!("Subjects: {}", subjects)),
        Node::text(format!("Expertise: {}", expertise)),
    ];
    if let Some(email) = contact {
        card.push(Node::text(format!("Contact: {}", email)));
    }
    Node::Card(card)
}

fn staff(ctx: &ViewContext<'_>) -> Vec<Node> {
    let hod = &ctx.facts.hod;
    let mut cards = vec![staff_card(
        &hod.name,
        &hod.role,
        content::HOD_SUBJECTS,
        content::HOD_EXPERTISE,
        "https://placehold.co/120",
        Some(hod.email.as_str()),
    )];
    cards.extend(
        content::STAFF
            .iter()
            .map(|m| staff_card(m.name, m.role, m.subjects, m.expertise, m.photo, None)),
    );
    vec![Node::Grid {
        columns: 3,
        children: cards,
    }]
}

fn gallery() -> Vec<Node> {
    vec![Node::Grid {
        columns: 3,
        children: content::GALLERY_ITEMS
            .iter()
            .map(|(title, src)| {
                Node::Card(vec![
                    Node::Image {
                        src: src.to_string(),
                        alt: title.to_string(),
                    },
                    Node::heading(2, *title),
                ])
            })
            .collect(),
    }]
}

pub fn rating_binding(criterion: &str, stars: u8) -> String {
    format!("rate-{}-{}", criterion, stars)
}

fn feedback(ctx: &ViewContext<'_>, bindings: &mut Bindings) -> Vec<Node> {
    let mut rating = vec![Node::heading(1, "Rate your experience")];
    for criterion in FEEDBACK_CRITERIA {
        let ids: Vec<String> = (1..=5u8)
            .map(|stars| {
                let id = rating_binding(criterion, stars);
                bindings.bind(
                    id.clone(),
                    Action::Rate {
                        criterion: criterion.to_string(),
                        stars,
                    },
                );
                id
            })
            .collect();
        rating.push(Node::Stars {
            criterion: criterion.to_string(),
            label: content::criterion_label(criterion).to_string(),
            selected: ctx.state.rating(criterion),
            bindings: ids,
        });
    }

    let comments = vec![
        Node::heading(1, "Say more (voice or text)"),
        Node::Input {
            field: FEEDBACK_TEXT_FIELD.to_string(),
            label: "Share your thoughts…".to_string(),
            kind: InputKind::TextArea,
            value: ctx.state.input(FEEDBACK_TEXT_FIELD).to_string(),
            required: false,
        },
        Node::Row(vec![
            bindings.button("voice-note", "🎙️ Voice Note (demo)", Action::VoiceNote),
            bindings.button("submit-feedback", "Submit", Action::SubmitFeedback),
        ]),
        Node::muted(format!("{} responses so far.", ctx.feedback_saved)),
    ];

    vec![Node::Grid {
        columns: 2,
        children: vec![Node::Card(rating), Node::Card(comments)],
    }]
}

fn not_found() -> Vec<Node> {
    vec![Node::Card(vec![
        Node::heading(1, "Page not found"),
        Node::muted("Use the buttons above."),
    ])]
}
