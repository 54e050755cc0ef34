// Suppress clippy warnings about unknown/renamed dylint lint names
#![allow(unknown_lints, renamed_and_removed_lints, max_lines_per_file)]

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use sourcesyncd::logging::{init_logging, parse_rotation, LogConfig};
use sourcesyncd::pull::FileAction;
use sourcesyncd::push::UploadStatus;
use sourcesyncd::remote::{HttpRemoteClient, RemoteSource};
use sourcesyncd::restart::RestartDispatcher;
use sourcesyncd::source::{list_sources, PathMapper};
use sourcesyncd::tracking::VersionTracker;
use sourcesyncd::{load_config, utils, PullEngine, PushEngine};
use std::path::PathBuf;
use std::sync::Arc;

/// Sourcesync Daemon - keeps local application and plugin trees in sync with
/// a remote version-control service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "SOURCESYNCD_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "SOURCESYNCD_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.sourcesyncd/logs)
    #[arg(long, env = "SOURCESYNCD_LOG_DIR")]
    log_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List remote sources together with their local install state
    Sources,
    /// Pull a source's files from the remote service into the local tree
    Update {
        /// Source identifier on the remote service
        source_id: String,
    },
    /// Push local edits of a source back to the remote service
    Upload {
        /// Source identifier on the remote service
        source_id: String,
    },
    /// Show the tracked version record for a source
    Status {
        /// Source identifier on the remote service
        source_id: String,
    },
}

#[allow(unknown_lints, max_lines_per_function, max_nesting_depth)]
#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    let args = Args::parse();

    let log_dir = args.log_dir.map(PathBuf::from).unwrap_or_else(|| {
        utils::state_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("logs")
    });
    init_logging(LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..LogConfig::default()
    })?;

    let state_dir =
        utils::state_dir().ok_or_else(|| eyre!("Failed to determine home directory"))?;
    let config = load_config(&state_dir).await?;
    let paths = PathMapper::from_config(&config)?;
    let tracker = VersionTracker::new(&state_dir);
    let remote: Arc<dyn RemoteSource> = Arc::new(HttpRemoteClient::new(&config.remote)?);

    match args.command {
        Command::Sources => {
            let listing = list_sources(remote.as_ref(), &paths, &tracker).await?;
            for source in &listing.sources {
                let installed = if source.installed { "installed" } else { "-" };
                println!(
                    "{}\t{}\t{}\t{}",
                    source.source_id,
                    source.source_name,
                    source.version.as_deref().unwrap_or("-"),
                    installed
                );
            }
            if listing.is_update_in_progress {
                println!("(an update is currently in progress)");
            }
        }
        Command::Update { source_id } => {
            let restarter = RestartDispatcher::new(config.restart.clone(), paths.app_root());
            let engine = PullEngine::new(remote, paths, tracker, restarter);
            let summary = engine.update_source(&source_id).await?;
            println!(
                "Updated {} to version {}: {} new, {} changed, {} unchanged",
                summary.source_name,
                summary.new_version,
                summary.count(FileAction::New),
                summary.count(FileAction::Changed),
                summary.count(FileAction::Unchanged),
            );
        }
        Command::Upload { source_id } => {
            let engine = PushEngine::new(remote, paths, tracker);
            let summary = engine.upload_source(&source_id).await?;
            println!(
                "Pushed {}: {} new, {} updated, {} unchanged",
                summary.source_name,
                summary.count(UploadStatus::New),
                summary.count(UploadStatus::Updated),
                summary.count(UploadStatus::Unchanged),
            );
        }
        Command::Status { source_id } => {
            if let Some(record) = tracker.status(&source_id).await? {
                println!("source:     {}", record.source_id);
                println!("version:    {}", record.current_version);
                println!("updated:    {}", record.last_updated);
                println!("in-progress: {}", record.is_update_in_progress);
            } else {
                println!("No tracking record for {source_id}");
            }
        }
    }

    Ok(())
}
