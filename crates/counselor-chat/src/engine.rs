//! Turns a free-text question into a canned informational reply.

use std::sync::Arc;

use counselor_core::types::Facts;

use crate::intent::{self, Intent};
use crate::voice::VoiceBridge;

/// Rule-based responder. Matching is total: every input gets a reply, the
/// generic one when no specific rule applies.
pub struct DialogueEngine {
    facts: Arc<Facts>,
    voice: Arc<VoiceBridge>,
}

impl DialogueEngine {
    pub fn new(facts: Arc<Facts>, voice: Arc<VoiceBridge>) -> Self {
        Self { facts, voice }
    }

    pub fn facts(&self) -> &Facts {
        &self.facts
    }

    /// Intent the input would be answered with.
    pub fn classify(&self, input: &str) -> Intent {
        intent::classify_normalized(&intent::normalize(input))
    }

    /// Reply to `input` and hand the reply to the voice bridge.
    ///
    /// Callers are expected to reject empty input before calling.
    pub fn respond(&self, input: &str) -> String {
        let intent = self.classify(input);
        let reply = intent.reply(&self.facts);
        tracing::debug!(%intent, "Dialogue intent selected");
        self.voice.speak(&reply);
        reply
    }
}

impl std::fmt::Debug for DialogueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueEngine")
            .field("voice", &self.voice)
            .finish()
    }
}
