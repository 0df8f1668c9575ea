use colored::Colorize;

mod cli;
mod config;
mod error;
mod gist;
mod sync;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        eprintln!("{} {err:#}", "error:".red());
        std::process::exit(1);
    }
}
