use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::Config;
use crate::gist::GistClient;
use crate::sync::{self, GistItem};

const DEFAULT_CONFIG_NAME: &str = "gist.config.json";

#[derive(Parser)]
#[command(version, about = "Download files from gists to local directories", long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to ./gist.config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Download a single gist file without a config file
    Sync {
        /// The gist to download from
        gist_id: String,

        /// Name of the file within the gist
        #[arg(short, long)]
        filename: String,

        /// Directory to write the file into
        #[arg(short, long)]
        output: String,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Sync {
            gist_id,
            filename,
            output,
        }) => {
            let item = GistItem::new(gist_id, filename, output);
            let client = GistClient::new().context("build http client")?;

            if let Err(err) = sync::process_item(&client, &item).await {
                sync::report_item_error(&item, &err);
            }

            Ok(())
        }

        None => run_batch(cli.config).await,
    }
}

async fn run_batch(config_path: Option<PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(config_path)?;
    let config = Config::load(&config_path).await.context("load config")?;
    let client = GistClient::new().context("build http client")?;

    let failed = sync_items(&client, &config.items).await;

    println!("{}", "All files downloaded.".green());

    if failed > 0 {
        eprintln!("{}", format!("{failed} item(s) failed").yellow());
    }

    Ok(())
}

/// Feeds every item through the processor, in order, returning how many
/// failed
///
/// A failed item is reported and counted, never fatal: the loop always
/// runs to the end.
async fn sync_items(client: &GistClient, items: &[GistItem]) -> usize {
    let mut failed = 0;

    for item in items {
        if let Err(err) = sync::process_item(client, item).await {
            sync::report_item_error(item, &err);
            failed += 1;
        }
    }

    failed
}

fn resolve_config_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }

    let default = env::current_dir()?.join(DEFAULT_CONFIG_NAME);

    if default.is_file() {
        Ok(default)
    } else {
        bail!("no {DEFAULT_CONFIG_NAME} found in the current directory; pass -c to point at a config file")
    }
}
