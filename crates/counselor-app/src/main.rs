//! Counselor application binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Open the record store (SQLite in the data directory, or memory)
//! 3. Build the voice bridge and the client
//! 4. Read commands from stdin until `quit` or Ctrl-C, delivering voice
//!    transcripts as they arrive

mod cli;
mod terminal;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use counselor_chat::VoiceBridge;
use counselor_core::config::CounselorConfig;
use counselor_storage::{Database, KeyValueStore, MemoryStore, RecordStore, SqliteStore};
use counselor_ui::{Client, Location};

use cli::CliArgs;
use terminal::{parse_command, TerminalRenderer};

/// Open the key-value backend for records.
fn open_backend(
    memory: bool,
    data_dir: &Path,
    db_file: &str,
) -> Result<Arc<dyn KeyValueStore>, Box<dyn std::error::Error>> {
    if memory {
        tracing::info!("Records kept in memory for this session");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if let Err(e) = std::fs::create_dir_all(data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }
    let db_path = data_dir.join(db_file);
    let db = Database::new(&db_path)?;
    tracing::info!(path = %db_path.display(), "SQLite database opened");
    Ok(Arc::new(SqliteStore::new(Arc::new(db))))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let config_file = args.resolve_config_path();
    let config = CounselorConfig::load_or_default(&config_file);

    // Tracing. RUST_LOG wins over flags and config.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting counselor v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Storage.
    let data_dir = args.resolve_data_dir(&config.general.data_dir);
    let backend = open_backend(
        args.resolve_memory(&config.storage.backend),
        &data_dir,
        &config.storage.db_file,
    )?;
    let store = Arc::new(RecordStore::new(backend));

    // The terminal has no speech engines, so listen reports unsupported.
    let voice = Arc::new(VoiceBridge::new(&config.voice, None, None));

    let renderer = TerminalRenderer::new(std::io::stdout());
    let mut client = Client::new(
        &config,
        store,
        voice,
        Location::new(args.resolve_route()),
        renderer,
    );
    client.renderer_mut().write_line("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = None;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !terminal::execute(&mut client, &mut pending, parse_command(&line)) {
                    break;
                }
            }
            outcome = terminal::next_outcome(&mut pending) => {
                pending = None;
                client.deliver_listen(outcome);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    tracing::info!("Counselor stopped");
    Ok(())
}
