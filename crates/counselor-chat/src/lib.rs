//! Conversational responder for the counselor client.
//!
//! Free-text questions are normalized and matched against an ordered list of
//! keyword rules; the first matching intent produces a canned reply filled
//! from the institutional facts. Replies are spoken through the voice bridge,
//! which also turns platform speech recognition into chat input.

pub mod engine;
pub mod error;
pub mod intent;
pub mod session;
pub mod voice;

pub use engine::DialogueEngine;
pub use error::ChatError;
pub use intent::{normalize, Intent};
pub use session::ChatSession;
pub use voice::{
    ListenOutcome, MockRecognizer, MockSynthesizer, RecognitionRequest, SpeechRecognizer,
    SpeechSynthesizer, Utterance, VoiceBridge, LISTEN_UNSUPPORTED_NOTICE,
};
