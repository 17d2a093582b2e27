//! Error types for the conversational interface.

/// Errors from the chat engine and voice bridge.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("speech recognition is not supported")]
    VoiceUnsupported,
    #[error("voice error: {0}")]
    VoiceError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(1000).to_string(),
            "message exceeds maximum length of 1000 characters"
        );
        assert_eq!(
            ChatError::VoiceUnsupported.to_string(),
            "speech recognition is not supported"
        );
        assert_eq!(
            ChatError::VoiceError("microphone busy".to_string()).to_string(),
            "voice error: microphone busy"
        );
    }
}
