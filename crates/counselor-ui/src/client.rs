//! Event dispatch for the single-page client.
//!
//! [`Client`] owns the router, the current view and its transient state. A
//! [`Renderer`] draws whatever view it is handed and reports user activity
//! back as binding activations and input edits.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use chrono::{Local, NaiveDateTime};

use counselor_chat::{ChatError, ChatSession, DialogueEngine, ListenOutcome, VoiceBridge, LISTEN_UNSUPPORTED_NOTICE};
use counselor_core::config::CounselorConfig;
use counselor_core::types::{ConversationTurn, Facts, RecordCategory, RecordDraft, Route};
use counselor_storage::{RecordStore, StoreError, FEEDBACK_CRITERIA, PROGRAMS};

use crate::content;
use crate::pages::{self, ViewContext, ViewState, ADMISSION_FIELDS, FEEDBACK_TEXT_FIELD, QUESTION_FIELD};
use crate::router::{Location, Transition, ViewRouter};
use crate::view::{Action, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient message shown to the user, like a browser alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A listen started by [`Client::start_listen`], running on the tokio
/// runtime. Await it (or poll it from a `select!` loop) and hand the outcome
/// to [`Client::deliver_listen`].
#[derive(Debug)]
pub struct ListenHandle {
    task: tokio::task::JoinHandle<ListenOutcome>,
}

impl ListenHandle {
    /// Stop waiting on the recognizer. The handle then resolves as
    /// [`ListenOutcome::Superseded`].
    pub fn abort(&self) {
        self.task.abort();
    }
}

impl Future for ListenHandle {
    type Output = ListenOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<ListenOutcome> {
        Pin::new(&mut self.task).poll(cx).map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => ListenOutcome::Superseded,
            Err(e) => ListenOutcome::Failed(e.to_string()),
        })
    }
}

/// Result of activating a binding.
#[derive(Debug)]
pub enum Activation {
    /// The current view has no binding with that id.
    Unbound,
    Handled,
    /// A listen is in flight; deliver its outcome when it resolves.
    Listening(ListenHandle),
}

impl Activation {
    pub fn is_bound(&self) -> bool {
        !matches!(self, Activation::Unbound)
    }
}

/// Draws views. Implementations decide how nodes look.
pub trait Renderer {
    fn render(&mut self, view: &View);

    /// Called after a route transition, once the new view is rendered.
    fn scroll_to_top(&mut self);

    fn notify(&mut self, notice: &Notice);
}

pub struct Client<R: Renderer> {
    router: ViewRouter,
    location: Location,
    facts: Arc<Facts>,
    store: Arc<RecordStore>,
    voice: Arc<VoiceBridge>,
    engine: Arc<DialogueEngine>,
    chat: ChatSession,
    state: ViewState,
    view: View,
    renderer: R,
    brand: String,
    assistant_name: String,
    greeting: String,
    max_message_chars: usize,
}

impl<R: Renderer> Client<R> {
    /// Build the client and render the view named by `location`.
    pub fn new(
        config: &CounselorConfig,
        store: Arc<RecordStore>,
        voice: Arc<VoiceBridge>,
        location: Location,
        renderer: R,
    ) -> Self {
        let facts = Arc::new(config.facts.clone());
        let engine = Arc::new(DialogueEngine::new(facts.clone(), voice.clone()));
        let greeting = config.greeting();
        let max_message_chars = config.chat.max_message_chars;
        let router = ViewRouter::new(&location);
        let chat = ChatSession::new(engine.clone(), &greeting, max_message_chars);

        let mut client = Self {
            view: placeholder_view(router.current()),
            router,
            location,
            facts,
            store,
            voice,
            engine,
            chat,
            state: ViewState::default(),
            renderer,
            brand: config.general.college_name.clone(),
            assistant_name: config.general.assistant_name.clone(),
            greeting,
            max_message_chars,
        };
        client.rerender();
        client
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn conversation(&self) -> &[ConversationTurn] {
        self.chat.turns()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Go to `target` and render it, even when it is the current route.
    pub fn navigate(&mut self, target: &str) -> Route {
        self.location.assign(target);
        let transition = self.router.navigate(target);
        self.enter(transition);
        self.route()
    }

    /// Write the location fragment. The navigation signal only fires when the
    /// path actually changes.
    pub fn assign_location(&mut self, target: &str) -> Route {
        if self.location.assign(target) {
            let transition = self.router.on_navigation_signal(&self.location);
            self.enter(transition);
        }
        self.route()
    }

    /// Record an edit to a field of the current view. Unknown fields are
    /// ignored and reported as `false`.
    pub fn set_input(&mut self, field: &str, value: &str) -> bool {
        if !self.view.has_field(field) {
            tracing::debug!(field, route = %self.route(), "Ignoring input for unknown field");
            return false;
        }
        self.state.inputs.insert(field.to_string(), value.to_string());
        true
    }

    /// Handle activation of the element bound to `binding_id`.
    ///
    /// Never waits on speech recognition: a listen binding returns
    /// [`Activation::Listening`] and the client stays usable meanwhile.
    pub fn activate(&mut self, binding_id: &str) -> Activation {
        let Some(binding) = self.view.binding(binding_id) else {
            tracing::warn!(binding_id, route = %self.route(), "No such binding");
            return Activation::Unbound;
        };
        let action = binding.action.clone();
        tracing::debug!(binding_id, ?action, "Binding activated");

        match action {
            Action::Navigate(path) => {
                self.assign_location(&path);
            }
            Action::Ask => {
                let question = self.state.input(QUESTION_FIELD).to_string();
                self.ask(&question);
            }
            Action::AskPreset(question) => {
                self.state.inputs.insert(QUESTION_FIELD.to_string(), question.clone());
                self.ask(&question);
            }
            Action::Listen => {
                if let Ok(handle) = self.start_listen() {
                    return Activation::Listening(handle);
                }
            }
            Action::SubmitAdmission => self.submit_admission(),
            Action::Rate { criterion, stars } => {
                self.state.ratings.insert(criterion, stars);
                self.rerender();
            }
            Action::SubmitFeedback => self.submit_feedback(),
            Action::VoiceNote => self.voice.speak(content::VOICE_NOTE_TEXT),
        }
        Activation::Handled
    }

    /// Ask the counselor a question. Blank input is ignored.
    pub fn ask(&mut self, text: &str) {
        let result = self.chat.ask(text).map(|_| ());
        match result {
            Ok(()) => {
                self.state.inputs.remove(QUESTION_FIELD);
                self.rerender();
            }
            Err(ChatError::EmptyMessage) => {}
            Err(e) => self.renderer.notify(&Notice::warning(e.to_string())),
        }
    }

    /// Start capturing one utterance on the tokio runtime.
    ///
    /// Any listen still pending resolves as superseded. Without a recognizer
    /// the unsupported notice is shown and nothing is spawned.
    pub fn start_listen(&mut self) -> Result<ListenHandle, ChatError> {
        if !self.voice.can_listen() {
            self.renderer.notify(&Notice::warning(LISTEN_UNSUPPORTED_NOTICE));
            return Err(ChatError::VoiceUnsupported);
        }
        let task = tokio::spawn(self.voice.listen());
        Ok(ListenHandle { task })
    }

    /// Feed a finished listen back in. A transcript is asked like typed text.
    pub fn deliver_listen(&mut self, outcome: ListenOutcome) {
        match outcome {
            ListenOutcome::Transcript(text) => {
                self.state.inputs.insert(QUESTION_FIELD.to_string(), text.clone());
                self.ask(&text);
            }
            ListenOutcome::Unsupported => self.renderer.notify(&Notice::warning(LISTEN_UNSUPPORTED_NOTICE)),
            ListenOutcome::Superseded => tracing::debug!("Listen superseded by a newer request"),
            ListenOutcome::Failed(reason) => {
                self.renderer
                    .notify(&Notice::warning(format!("Could not hear you: {}", reason)));
            }
        }
    }

    fn submit_admission(&mut self) {
        let mut draft = RecordDraft::new();
        for field in ADMISSION_FIELDS {
            let value = match (field, self.state.input(field)) {
                ("program", "") => PROGRAMS[0],
                (_, value) => value,
            };
            draft = draft.field(field, value);
        }

        if self.submit(RecordCategory::Admission, draft, content::INQUIRY_SAVED_NOTICE) {
            for field in ADMISSION_FIELDS {
                self.state.inputs.remove(field);
            }
        }
        self.rerender();
    }

    fn submit_feedback(&mut self) {
        let mut draft = RecordDraft::new().field(FEEDBACK_TEXT_FIELD, self.state.input(FEEDBACK_TEXT_FIELD));
        for criterion in FEEDBACK_CRITERIA {
            draft = draft.rating(criterion, self.state.rating(criterion));
        }

        if self.submit(RecordCategory::Feedback, draft, content::FEEDBACK_SAVED_NOTICE) {
            self.state.ratings.clear();
            self.state.inputs.remove(FEEDBACK_TEXT_FIELD);
        }
        self.rerender();
    }

    fn submit(&mut self, category: RecordCategory, draft: RecordDraft, saved: &str) -> bool {
        match self.store.append(category, draft) {
            Ok(_) => {
                self.renderer.notify(&Notice::info(saved));
                true
            }
            Err(StoreError::Rejected(reason)) => {
                self.renderer.notify(&Notice::warning(capitalize(&reason.to_string())));
                false
            }
            Err(e) => {
                tracing::error!(category = %category, error = %e, "Failed to store submission");
                self.renderer
                    .notify(&Notice::error(format!("Could not save your submission: {}", e)));
                false
            }
        }
    }

    fn enter(&mut self, transition: Transition) {
        self.state = ViewState::default();
        self.chat = ChatSession::new(self.engine.clone(), &self.greeting, self.max_message_chars);
        self.rerender();
        self.renderer.scroll_to_top();
        tracing::info!(route = %transition.to, fragment = self.location.fragment(), "View entered");
    }

    fn rerender(&mut self) {
        let ctx = ViewContext {
            brand: &self.brand,
            assistant_name: &self.assistant_name,
            facts: &self.facts,
            conversation: self.chat.turns(),
            admissions_saved: self.saved_count(RecordCategory::Admission),
            feedback_saved: self.saved_count(RecordCategory::Feedback),
            state: &self.state,
            now: local_now(),
        };
        self.view = pages::render(self.router.current(), &ctx);
        self.renderer.render(&self.view);
    }

    fn saved_count(&self, category: RecordCategory) -> usize {
        self.store.count(category).unwrap_or_else(|e| {
            tracing::warn!(category = %category, error = %e, "Could not count stored records");
            0
        })
    }
}

impl<R: Renderer> std::fmt::Debug for Client<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("route", &self.route())
            .field("location", &self.location)
            .field("turns", &self.chat.turns().len())
            .finish()
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn placeholder_view(route: Route) -> View {
    View {
        route,
        shell: crate::shell::Shell {
            brand: String::new(),
            tagline: String::new(),
            clock: String::new(),
            nav: Vec::new(),
        },
        content: Vec::new(),
        bindings: Vec::new(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
