use anyhow::Result;
use clap::{Parser, Subcommand};

use cobot::{config, logging};

mod cli;

#[derive(Debug, Parser)]
#[command(name = "cobot")]
#[command(about = "Training recommendation dashboard and chatbot")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the dashboard and chatbot pages over HTTP
    Serve {
        /// Listen address (default: [server] addr)
        #[arg(long)]
        addr: Option<String>,
        /// Open the dashboard in the default browser
        #[arg(long)]
        open: bool,
    },
    /// List the filter options offered by the backend
    Filters {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Fetch KPIs, charts and the data preview for a filter selection
    Analytics {
        /// Level to filter on (repeatable)
        #[arg(long = "level")]
        levels: Vec<String>,
        /// Training type to filter on (repeatable)
        #[arg(long = "type")]
        types: Vec<String>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Ask the chatbot for recommendations
    Chat {
        /// The question to ask
        #[arg(trailing_var_arg = true, required = true)]
        message: Vec<String>,
        /// Result page to request
        #[arg(long, default_value = "1")]
        page: u32,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration: show, init, set, reset
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Write the default config to ~/.cobot/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `backend.base_url http://10.0.0.5:5001`
    Set { key: String, value: String },
    /// Reset ~/.cobot/config.toml to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let cfg = config::load();

    // A second subscriber can only come from an embedding host; keep going.
    let _ = logging::init(&cfg.logging.level);

    match app.command {
        Commands::Serve { addr, open } => {
            let addr = addr.unwrap_or_else(|| cfg.server.addr.clone());
            cli::run_serve(&cfg, &addr, open || cfg.server.open_browser)
        }
        Commands::Filters { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_filters(&cfg, fmt)
        }
        Commands::Analytics {
            levels,
            types,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_analytics(&cfg, levels, types, fmt)
        }
        Commands::Chat {
            message,
            page,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_chat(&cfg, &message.join(" "), page, fmt)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
