mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "srp")]
#[command(about = "SR+ reservation priority-counter audit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch periods from the reservation service and validate the current one
    Validate {
        /// Event id of the period being audited
        current: String,

        /// Prior event ids, newest first
        previous: Vec<String>,

        /// Layered config paths in merge order (repeatable)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Print the report as JSON instead of key=value lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Validate exported CSV files (no network)
    ValidateCsv {
        /// Current export, followed by prior exports newest first
        #[arg(required = true)]
        files: Vec<String>,

        /// Layered config paths in merge order (repeatable)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Fetch periods and write them as CSV exports (<out>/<event_id>.csv)
    Snapshot {
        /// Output directory (created if missing)
        #[arg(long)]
        out: String,

        /// Layered config paths in merge order (repeatable)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show one participant's tracked claim across exported periods
    Trace {
        /// Participant name (case-insensitive)
        #[arg(long)]
        name: String,

        /// Exports newest first
        #[arg(required = true)]
        files: Vec<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Dev-time convenience: load .env.local if present. Real env vars win.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Validate {
            current,
            previous,
            config_paths,
            json,
        } => {
            let settings = commands::load_settings(&config_paths)?;
            commands::validate::validate_remote(&settings, &current, &previous, json).await?;
        }

        Commands::ValidateCsv {
            files,
            config_paths,
            json,
        } => {
            let settings = commands::load_settings(&config_paths)?;
            commands::validate::validate_csv(&settings, &files, json)?;
        }

        Commands::Snapshot {
            out,
            config_paths,
            ids,
        } => {
            let settings = commands::load_settings(&config_paths)?;
            commands::snapshot::snapshot(&settings, &out, &ids).await?;
        }

        Commands::Trace { name, files, json } => {
            commands::trace::trace(&name, &files, json)?;
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = srp_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
