//! Line-oriented terminal front-end: a text [`Renderer`] and the command
//! language typed at the prompt.

use std::io::Write;

use counselor_chat::ListenOutcome;
use counselor_core::types::{Role, Route};
use counselor_ui::charts::{BarChart, PieChart};
use counselor_ui::{Activation, Client, InputKind, ListenHandle, Node, Notice, NoticeLevel, Renderer, View};

pub const HELP: &str = "\
Commands:
  #/path               go to a view, e.g. #/placements
  ask <question>       ask the counselor
  click <binding>      press a button shown as [label](binding)
  set <field> <value>  fill in a form field
  listen               ask by voice
  help                 show this help
  quit                 exit";

const BAR_WIDTH: f64 = 30.0;

/// Writes each view as plain text.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "Terminal write failed");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &View) {
        let mut lines = Vec::new();
        render_shell(view, &mut lines);
        for node in &view.content {
            render_node(node, &mut lines);
        }
        self.write_line(&lines.join("\n"));
    }

    fn scroll_to_top(&mut self) {
        tracing::trace!("Scroll to top");
    }

    fn notify(&mut self, notice: &Notice) {
        let marker = match notice.level {
            NoticeLevel::Info => "*",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "!!",
        };
        self.write_line(&format!("{} {}", marker, notice.message));
    }
}

fn render_shell(view: &View, lines: &mut Vec<String>) {
    let shell = &view.shell;
    lines.push(format!("== {} ==  {}", shell.brand, shell.tagline));
    lines.push(shell.clock.clone());
    let pills: Vec<String> = shell
        .nav
        .iter()
        .map(|item| {
            if item.active {
                format!("<{}>", item.label)
            } else {
                format!("[{}]({})", item.label, item.binding)
            }
        })
        .collect();
    lines.push(pills.join(" "));
    lines.push(String::new());
}

fn render_node(node: &Node, lines: &mut Vec<String>) {
    match node {
        Node::Heading { level, text } => {
            lines.push(format!("{} {}", "#".repeat(usize::from(*level)), text));
        }
        Node::Text { text, muted } => {
            if *muted {
                lines.push(format!("  {}", text));
            } else {
                lines.push(text.clone());
            }
        }
        Node::List(items) => lines.extend(items.iter().map(|i| format!("- {}", i))),
        Node::Card(children) => {
            for child in children {
                render_node(child, lines);
            }
            lines.push(String::new());
        }
        Node::Grid { children, .. } | Node::Row(children) => {
            for child in children {
                render_node(child, lines);
            }
        }
        Node::Image { alt, .. } => lines.push(format!("[image: {}]", alt)),
        Node::Message { badge, text } => lines.push(format!("{:>4} | {}", badge, text)),
        Node::Input {
            field,
            label,
            kind,
            value,
            required,
        } => {
            let marker = if *required { " *" } else { "" };
            let kind = match kind {
                InputKind::Text => "text",
                InputKind::Email => "email",
                InputKind::TextArea => "long text",
            };
            lines.push(format!("{}{} ({}, set {}): {}", label, marker, kind, field, value));
        }
        Node::Select {
            field,
            label,
            options,
            selected,
        } => {
            lines.push(format!(
                "{} (set {}): {}  [{}]",
                label,
                field,
                selected,
                options.join(" | ")
            ));
        }
        Node::Stars {
            label,
            selected,
            bindings,
            ..
        } => {
            let stars: String = (1..=5u8).map(|n| if n <= *selected { '★' } else { '☆' }).collect();
            let hint = bindings.first().map(|b| b.trim_end_matches('1')).unwrap_or_default();
            lines.push(format!("{:<18} {}  ({}1..5)", label, stars, hint));
        }
        Node::Button { binding, label } => lines.push(format!("[{}]({})", label, binding)),
        Node::BarChart(chart) => render_bar(chart, lines),
        Node::PieChart(chart) => render_pie(chart, lines),
    }
}

fn render_bar(chart: &BarChart, lines: &mut Vec<String>) {
    let max = chart.series.iter().copied().fold(0.0_f64, f64::max);
    lines.push(format!("({})", chart.name));
    for (label, value) in chart.labels.iter().zip(&chart.series) {
        let width = if max > 0.0 {
            (value / max * BAR_WIDTH).round() as usize
        } else {
            0
        };
        lines.push(format!("{:<18} {:>6} {}", label, value, "█".repeat(width)));
    }
}

fn render_pie(chart: &PieChart, lines: &mut Vec<String>) {
    for slice in &chart.slices {
        lines.push(format!("o {}", slice.label));
    }
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(String),
    Ask(String),
    Click(String),
    Set { field: String, value: String },
    Listen,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if line.starts_with('#') {
        return Command::Navigate(line.to_string());
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head.to_ascii_lowercase().as_str() {
        "ask" if !rest.is_empty() => Command::Ask(rest.to_string()),
        "click" if !rest.is_empty() => Command::Click(rest.to_string()),
        "set" => match rest.split_once(char::is_whitespace) {
            Some((field, value)) => Command::Set {
                field: field.to_string(),
                value: value.trim().to_string(),
            },
            None if !rest.is_empty() => Command::Set {
                field: rest.to_string(),
                value: String::new(),
            },
            None => Command::Unknown(line.to_string()),
        },
        "listen" => Command::Listen,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Apply a command to the client. Returns `false` when the session should end.
///
/// A listen is left in `pending` for the prompt loop to deliver; starting
/// another one drops the older request.
pub fn execute<W: Write>(
    client: &mut Client<TerminalRenderer<W>>,
    pending: &mut Option<ListenHandle>,
    command: Command,
) -> bool {
    match command {
        Command::Quit => return false,
        Command::Empty => {}
        Command::Help => client.renderer_mut().write_line(HELP),
        Command::Navigate(target) => {
            client.assign_location(&target);
        }
        Command::Ask(question) => {
            let before = client.conversation().len();
            client.ask(&question);
            // Off the home view the conversation is not drawn, so echo the reply.
            if client.route() != Route::Home && client.conversation().len() > before {
                let reply = client
                    .conversation()
                    .last()
                    .filter(|turn| turn.role == Role::Assistant)
                    .map(|turn| format!("{:>4} | {}", turn.role.badge(), turn.text));
                if let Some(reply) = reply {
                    client.renderer_mut().write_line(&reply);
                }
            }
        }
        Command::Click(binding) => match client.activate(&binding) {
            Activation::Unbound => {
                let notice = Notice::warning(format!("Nothing to click called '{}' on this view", binding));
                client.renderer_mut().notify(&notice);
            }
            Activation::Handled => {}
            Activation::Listening(handle) => replace_pending(pending, handle),
        },
        Command::Set { field, value } => {
            if !client.set_input(&field, &value) {
                let notice = Notice::warning(format!("This view has no field called '{}'", field));
                client.renderer_mut().notify(&notice);
            }
        }
        Command::Listen => {
            if let Ok(handle) = client.start_listen() {
                replace_pending(pending, handle);
            }
        }
        Command::Unknown(line) => {
            tracing::debug!(line, "Unrecognised command");
            let notice = Notice::warning(format!("Unknown command '{}'. Type 'help' for commands.", line));
            client.renderer_mut().notify(&notice);
        }
    }
    true
}

fn replace_pending(pending: &mut Option<ListenHandle>, handle: ListenHandle) {
    if let Some(stale) = pending.replace(handle) {
        stale.abort();
    }
}

/// Resolve the pending listen, or never when there is none.
pub async fn next_outcome(pending: &mut Option<ListenHandle>) -> ListenOutcome {
    match pending {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}
