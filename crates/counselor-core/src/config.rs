use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CounselorError, Result};
use crate::types::Facts;

/// Top-level configuration for the counselor client.
///
/// Loaded from `~/.counselor/config.toml` by default. Every section falls
/// back to its defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounselorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub facts: Facts,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CounselorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CounselorConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file does not
    /// exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CounselorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Opening line the assistant greets every new chat session with.
    pub fn greeting(&self) -> String {
        format!(
            "Hello there! I'm {}, your personal guide at {}. I'm so glad you stopped by! \
             What can I help you discover about {} today?",
            self.general.assistant_name, self.general.college_name, self.general.college_short_name
        )
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the local record database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    pub college_name: String,
    pub college_short_name: String,
    /// Name the assistant introduces itself with; also the header tag.
    pub assistant_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.counselor/data".to_string(),
            log_level: "info".to_string(),
            college_name: "HKBK College of Engineering".to_string(),
            college_short_name: "HKBK".to_string(),
            assistant_name: "HK-Counselor".to_string(),
        }
    }
}

/// Chat session limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Longest accepted question, in characters.
    pub max_message_chars: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_chars: 1000,
        }
    }
}

/// Speech input/output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// When false the client behaves as if no speech capability exists.
    pub enabled: bool,
    /// BCP 47 language tag for recognition and synthesis.
    pub language: String,
    /// Speech synthesis rate (1.0 = normal).
    pub rate: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en-IN".to_string(),
            rate: 1.0,
        }
    }
}

/// Record persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend: "sqlite" or "memory".
    pub backend: String,
    /// Database file name inside `general.data_dir`.
    pub db_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            db_file: "records.db".to_string(),
        }
    }
}
