//! Declarative view tree handed to a [`Renderer`](crate::client::Renderer).
//!
//! Views carry no behaviour. Interactive elements reference a [`Binding`]
//! by id, and the client resolves the id back to an [`Action`].

use counselor_core::types::Route;

use crate::charts::{BarChart, PieChart};
use crate::shell::Shell;

/// What happens when a bound element is activated.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move the location to a path.
    Navigate(String),
    /// Ask the text currently in the question input.
    Ask,
    /// Ask a fixed question.
    AskPreset(String),
    /// Start speech recognition and ask the transcript.
    Listen,
    SubmitAdmission,
    Rate { criterion: String, stars: u8 },
    SubmitFeedback,
    /// Speak the demo voice-note notice.
    VoiceNote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub id: String,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    TextArea,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading { level: u8, text: String },
    Text { text: String, muted: bool },
    List(Vec<String>),
    Card(Vec<Node>),
    Grid { columns: u8, children: Vec<Node> },
    Row(Vec<Node>),
    Image { src: String, alt: String },
    /// One conversation line with its role badge.
    Message { badge: &'static str, text: String },
    Input {
        field: String,
        label: String,
        kind: InputKind,
        value: String,
        required: bool,
    },
    Select {
        field: String,
        label: String,
        options: Vec<String>,
        selected: String,
    },
    /// A five-star rating row. `bindings[n]` selects `n + 1` stars.
    Stars {
        criterion: String,
        label: String,
        selected: u8,
        bindings: Vec<String>,
    },
    Button { binding: String, label: String },
    BarChart(BarChart),
    PieChart(PieChart),
}

impl Node {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Node::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            muted: false,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            muted: true,
        }
    }

    fn children(&self) -> &[Node] {
        match self {
            Node::Card(children) | Node::Row(children) => children,
            Node::Grid { children, .. } => children,
            _ => &[],
        }
    }

    fn visit<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for child in self.children() {
            child.visit(out);
        }
    }
}

/// A fully rendered view.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub route: Route,
    pub shell: Shell,
    pub content: Vec<Node>,
    pub bindings: Vec<Binding>,
}

impl View {
    pub fn binding(&self, id: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.id == id)
    }

    /// Every node in document order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for node in &self.content {
            node.visit(&mut out);
        }
        out
    }

    /// Whether the view declares an input or select named `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.nodes().into_iter().any(|node| match node {
            Node::Input { field: f, .. } | Node::Select { field: f, .. } => f == field,
            _ => false,
        })
    }

    /// All visible text, flattened. Handy for terminals and assertions.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        for node in self.nodes() {
            match node {
                Node::Heading { text, .. } | Node::Text { text, .. } => parts.push(text.clone()),
                Node::List(items) => parts.extend(items.iter().cloned()),
                Node::Message { badge, text } => parts.push(format!("{}: {}", badge, text)),
                Node::Button { label, .. } => parts.push(label.clone()),
                Node::Stars { label, .. } => parts.push(label.clone()),
                Node::Image { alt, .. } => parts.push(alt.clone()),
                _ => {}
            }
        }
        parts.join("\n")
    }
}

/// Collects bindings while a page builds its nodes.
#[derive(Debug, Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under `id` and return the button node for it.
    pub fn button(&mut self, id: impl Into<String>, label: impl Into<String>, action: Action) -> Node {
        let id = id.into();
        self.bind(id.clone(), action);
        Node::Button {
            binding: id,
            label: label.into(),
        }
    }

    pub fn bind(&mut self, id: impl Into<String>, action: Action) {
        self.entries.push(Binding {
            id: id.into(),
            action,
        });
    }

    pub fn into_vec(self) -> Vec<Binding> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_walks_nested_children() {
        let tree = Node::Grid {
            columns: 2,
            children: vec![Node::Card(vec![Node::heading(2, "A"), Node::Row(vec![Node::text("B")])])],
        };
        let mut out = Vec::new();
        tree.visit(&mut out);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_button_registers_binding() {
        let mut bindings = Bindings::new();
        let node = bindings.button("go", "Go", Action::Navigate("/staff".into()));
        assert_eq!(
            node,
            Node::Button {
                binding: "go".into(),
                label: "Go".into()
            }
        );
        let entries = bindings.into_vec();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, Action::Navigate("/staff".into()));
    }
}
