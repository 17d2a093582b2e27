//! Bridge between the chat and the platform speech engines.
//!
//! Both engines are optional. Recognition is single-shot and "last request
//! wins": starting a new listen makes any outstanding one resolve as
//! [`ListenOutcome::Superseded`]. Synthesis holds at most one utterance; a
//! new `speak` cancels whatever is playing.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use counselor_core::config::VoiceConfig;

use crate::error::ChatError;

/// Notice shown when the platform has no speech recognition.
pub const LISTEN_UNSUPPORTED_NOTICE: &str = "Speech recognition is not supported on this device.";

/// Parameters handed to the recognizer for one listen session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionRequest {
    pub language: String,
    /// Always false: one utterance per session.
    pub continuous: bool,
    /// Always false: only final results are delivered.
    pub interim_results: bool,
}

/// One piece of speech to synthesize.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: String,
    pub rate: f32,
}

/// How a listen request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenOutcome {
    /// Final transcript, result segments joined with spaces.
    Transcript(String),
    /// No recognizer is available.
    Unsupported,
    /// A newer listen request started before this one completed.
    Superseded,
    Failed(String),
}

/// Platform speech-to-text.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Capture one utterance and return its result segments.
    async fn recognize(&self, request: &RecognitionRequest) -> Result<Vec<String>, ChatError>;
}

/// Platform text-to-speech. Calls return immediately.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, utterance: Utterance);

    /// Stop the current utterance, if any.
    fn cancel(&self);
}

/// Single-slot speech bridge.
pub struct VoiceBridge {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    language: String,
    rate: f32,
    listen_generation: AtomicU64,
}

impl VoiceBridge {
    pub fn new(
        config: &VoiceConfig,
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        let (recognizer, synthesizer) = if config.enabled {
            (recognizer, synthesizer)
        } else {
            (None, None)
        };
        Self {
            recognizer,
            synthesizer,
            language: config.language.clone(),
            rate: config.rate,
            listen_generation: AtomicU64::new(0),
        }
    }

    /// A bridge with no speech capability at all.
    pub fn unsupported() -> Self {
        Self::new(&VoiceConfig::default(), None, None)
    }

    pub fn can_listen(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn can_speak(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Start listening for one utterance and return a future that resolves it.
    ///
    /// The slot is claimed before this returns, so a later call supersedes
    /// this one even if neither future has been polled yet. The future owns
    /// its bridge handle and can be spawned onto a runtime.
    pub fn listen(self: &Arc<Self>) -> impl Future<Output = ListenOutcome> + Send + 'static {
        let bridge = Arc::clone(self);
        let ticket = self.claim_listen();
        async move {
            match ticket {
                Some(ticket) => bridge.finish_listen(ticket).await,
                None => ListenOutcome::Unsupported,
            }
        }
    }

    fn claim_listen(&self) -> Option<u64> {
        if self.recognizer.is_none() {
            tracing::info!("Listen requested but speech recognition is unavailable");
            return None;
        }
        Some(self.listen_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn finish_listen(&self, ticket: u64) -> ListenOutcome {
        let Some(recognizer) = &self.recognizer else {
            return ListenOutcome::Unsupported;
        };
        let request = RecognitionRequest {
            language: self.language.clone(),
            continuous: false,
            interim_results: false,
        };
        tracing::debug!(ticket, language = %request.language, "Listening");

        let result = recognizer.recognize(&request).await;

        if self.listen_generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "Dropping result of superseded listen");
            return ListenOutcome::Superseded;
        }

        match result {
            Ok(segments) => ListenOutcome::Transcript(segments.join(" ")),
            Err(e) => {
                tracing::warn!(error = %e, "Speech recognition failed");
                ListenOutcome::Failed(e.to_string())
            }
        }
    }

    /// Speak `text`, interrupting any current utterance. Silent no-op when no
    /// synthesizer is available.
    pub fn speak(&self, text: &str) {
        let Some(synthesizer) = &self.synthesizer else {
            return;
        };
        synthesizer.cancel();
        synthesizer.speak(Utterance {
            text: text.to_string(),
            language: self.language.clone(),
            rate: self.rate,
        });
    }
}

impl std::fmt::Debug for VoiceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceBridge")
            .field("can_listen", &self.can_listen())
            .field("can_speak", &self.can_speak())
            .field("language", &self.language)
            .finish()
    }
}

// =============================================================================
// Mock implementations
// =============================================================================

/// Recognizer that returns scripted transcripts in order, then
/// `[mock transcript]` once the script runs out.
#[derive(Debug, Default)]
pub struct MockRecognizer {
    script: Mutex<VecDeque<Result<Vec<String>, String>>>,
    requests: Mutex<Vec<RecognitionRequest>>,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcripts<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        if let Ok(mut script) = mock.script.lock() {
            script.extend(transcripts.into_iter().map(|t| Ok(vec![t.into()])));
        }
        mock
    }

    /// Queue a failure for the next recognition.
    pub fn push_failure(&self, reason: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(reason.into()));
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecognitionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn recognize(&self, request: &RecognitionRequest) -> Result<Vec<String>, ChatError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match next {
            Some(Ok(segments)) => Ok(segments),
            Some(Err(reason)) => Err(ChatError::VoiceError(reason)),
            None => Ok(vec!["[mock transcript]".to_string()]),
        }
    }
}

/// Synthesizer that records what it was asked to do.
#[derive(Debug, Default)]
pub struct MockSynthesizer {
    spoken: Mutex<Vec<Utterance>>,
    cancels: AtomicU64,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every utterance passed to `speak`, oldest first.
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last_text(&self) -> Option<String> {
        self.spoken().last().map(|u| u.text.clone())
    }

    pub fn cancel_count(&self) -> u64 {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn speak(&self, utterance: Utterance) {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(utterance);
        }
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}
