mod browse;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use idrcrds_content_config::{Config, DEFAULT_CONTENT_FILE};
use idrcrds_content_engine::{FileStore, PartialSiteContent, read_content, update_content};
use std::{
    io::Read,
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "idrcrds-content",
    version,
    about = "Read, patch and browse the ID RCRDS site content document"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Content document to use instead of the one in the config file.
    #[arg(long, value_name = "FILE", global = true, env = "IDRCRDS_CONTENT")]
    content: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed content as JSON.
    Show,

    /// Apply a partial update read from a JSON file and print the result.
    Patch {
        /// JSON file with the fields to change, `-` for stdin.
        #[arg(value_name = "UPDATE_JSON")]
        update: PathBuf,
    },

    /// Browse the sections in a terminal viewer.
    Browse,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let content_path = resolve_content_path(cli.content)?;
    log::debug!("Content document: {}", content_path.display());
    let store = FileStore::new(content_path);

    match cli.command.unwrap_or(Command::Browse) {
        Command::Show => {
            let content = read_content(&store);
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Command::Patch { update } => {
            let update = read_update(&update)?;
            if update.is_empty() {
                log::warn!("Update contains no known fields; the document is rewritten as-is");
            }
            let content = update_content(&store, &update)
                .with_context(|| format!("Failed to save {}", store.path().display()))?;
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Command::Browse => browse::run(store)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// `--content` first, then the config file, then the default path under the
/// current directory.
fn resolve_content_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let config_path = Config::config_path();
    match Config::load().context("Failed to load config file")? {
        Some(config) => Ok(config.content_path()),
        None => {
            log::debug!(
                "No config file at {}, using ./{DEFAULT_CONTENT_FILE}",
                config_path.display()
            );
            Ok(PathBuf::from(DEFAULT_CONTENT_FILE))
        }
    }
}

fn read_update(source: &Path) -> Result<PartialSiteContent> {
    let json = if source == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read update from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read update from {}", source.display()))?
    };
    serde_json::from_str(&json).context("Update is not a valid site content object")
}
