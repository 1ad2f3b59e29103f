//! Entry point for llmloader.
//!
//! Loads `.env`, parses CLI arguments via [`cli`], sets up logging and runs the
//! prompt.

use colored::Colorize;
use llmloader::{cli, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = cli::run(cli).await {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
