use anyhow::Result;
use clap::Parser;
use cratedig_beatport::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cratedig", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Search Beatport for releases
    ///
    /// Prints one line per matching release: its Beatport id followed by
    /// "Artists - Title {Year Label Catalog} [N tracks]". Releases on labels
    /// listed in `excluded_labels` are skipped and do not count toward the
    /// limit. Credits with four or more artists are shown as the configured
    /// various-artists marker.
    Search {
        /// Search terms
        query: String,

        /// Maximum number of results (0 for all; default from config)
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Fetch full metadata for a release
    ///
    /// Accepts a Beatport release URL
    /// (https://www.beatport.com/release/<slug>/<id>) or a bare numeric id.
    Release {
        /// Release URL or numeric id
        id_or_url: String,

        /// Print the release record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    if let Err(e) = twyg::setup(config.logging.clone()) {
        eprintln!("Failed to set up logging: {e}");
    }

    match cli.command {
        Commands::Search { query, limit } => {
            let limit = limit.unwrap_or(config.search_limit);
            commands::run_search(config, &query, limit).await?;
        }
        Commands::Release { id_or_url, json } => {
            commands::run_release(config, &id_or_url, json).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show_config(&config)?,
            ConfigCommands::Path => commands::config::show_path()?,
            ConfigCommands::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
