//! CLI argument definitions for the counselor binary.
//!
//! Priority resolution: CLI args > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// HK-Counselor: a college counselor assistant in the terminal.
#[derive(Parser, Debug)]
#[command(name = "counselor", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory holding the record database.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Keep submissions in memory only.
    #[arg(long = "memory")]
    pub memory: bool,

    /// Route to open first, e.g. `/placements`.
    #[arg(short = 'r', long = "route")]
    pub route: Option<String>,
}

impl CliArgs {
    /// Priority: --config flag > platform default (~/.counselor/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        match self.config {
            Some(ref p) => p.clone(),
            None => default_config_path(),
        }
    }

    /// Priority: --data-dir flag > config file value. A leading `~` expands
    /// to the home directory.
    pub fn resolve_data_dir(&self, config_data_dir: &str) -> PathBuf {
        match self.data_dir {
            Some(ref p) => p.clone(),
            None => expand_home(config_data_dir),
        }
    }

    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Whether records should live in memory, either by flag or by config.
    pub fn resolve_memory(&self, config_backend: &str) -> bool {
        self.memory || config_backend.eq_ignore_ascii_case("memory")
    }

    /// Initial location fragment. Empty means home.
    pub fn resolve_route(&self) -> String {
        self.route.clone().unwrap_or_default()
    }
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let home = std::env::var("USERPROFILE");
    #[cfg(not(target_os = "windows"))]
    let home = std::env::var("HOME");
    home.ok().map(PathBuf::from)
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        return home_dir().unwrap_or_else(|| PathBuf::from(".")).join(rest);
    }
    PathBuf::from(path)
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    match home_dir() {
        Some(home) => home.join(".counselor").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["counselor"]);
        assert!(!args.memory);
        assert_eq!(args.resolve_log_level("warn"), "warn");
        assert_eq!(args.resolve_route(), "");
        assert!(args.resolve_config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs::parse_from([
            "counselor",
            "--data-dir",
            "/tmp/hk",
            "--log-level",
            "debug",
            "--route",
            "/staff",
            "--memory",
        ]);
        assert_eq!(args.resolve_data_dir("~/.counselor/data"), PathBuf::from("/tmp/hk"));
        assert_eq!(args.resolve_log_level("info"), "debug");
        assert_eq!(args.resolve_route(), "/staff");
        assert!(args.resolve_memory("sqlite"));
    }

    #[test]
    fn test_memory_backend_from_config() {
        let args = CliArgs::parse_from(["counselor"]);
        assert!(args.resolve_memory("Memory"));
        assert!(!args.resolve_memory("sqlite"));
    }

    #[test]
    fn test_relative_data_dir_is_kept() {
        let args = CliArgs::parse_from(["counselor"]);
        assert_eq!(args.resolve_data_dir("data"), PathBuf::from("data"));
    }
}
