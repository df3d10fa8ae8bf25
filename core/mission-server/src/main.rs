//! mission-control: HTTP API and CLI for the Mission Control dashboard.
//!
//! Serves a live activity feed built from agent session logs, plus list and
//! calendar views of the scheduler's cron jobs.
//!
//! ## Subcommands
//!
//! - `serve`: Run the HTTP API
//! - `activity`: Print the activity feed as JSON
//! - `cron`: Print the cron job list as JSON
//! - `calendar`: Print the calendar projection as JSON

mod api;
mod cli;
mod logging;
mod routes;
mod server;
mod state;

use clap::{Parser, Subcommand};
use mission_core::{load_config, ActivityFilter, JobFilter, StorageConfig};
use state::AppState;
use std::env;
use std::path::PathBuf;
use tracing::error;

const CONFIG_ENV: &str = "MISSION_CONTROL_CONFIG";

#[derive(Parser)]
#[command(name = "mission-control")]
#[command(about = "Activity feed and cron views for an agent runtime")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.mission-control/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the activity feed
    Activity {
        /// Only this activity kind (message, tool_call, tool_result, session_start, thinking)
        #[arg(long = "type", value_name = "KIND")]
        kind: Option<String>,

        /// Only this session id
        #[arg(long)]
        session: Option<String>,

        /// Maximum number of items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the cron job list
    Cron {
        /// Only enabled (true) or disabled (false) jobs
        #[arg(long)]
        enabled: Option<bool>,

        /// Only this schedule kind (cron, every, at)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Print enabled jobs placed on the weekly calendar
    Calendar,
}

fn main() {
    let cli = Cli::parse();
    let storage = StorageConfig::default();
    let config_path = cli
        .config
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| storage.config_file());

    let config = load_config(&config_path);
    let log_dir = config
        .as_ref()
        .ok()
        .and_then(|config| config.log_dir(&storage));
    let _logging_guard = logging::init(log_dir.as_deref());

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, path = %config_path.display(), "Failed to load config");
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(&config, &storage) {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Serve { bind, port } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let port = port.unwrap_or(config.server.port);
            server::run(state, &bind, port)
        }
        Commands::Activity {
            kind,
            session,
            limit,
        } => cli::activity(
            &state,
            &ActivityFilter {
                kind,
                session,
                limit,
            },
        ),
        Commands::Cron { enabled, kind } => cli::cron(&state, &JobFilter { enabled, kind }),
        Commands::Calendar => cli::calendar(&state),
    };

    if let Err(err) = result {
        error!(error = %err, "mission-control failed");
        std::process::exit(1);
    }
}
