//! locker-gen CLI entry point
//!
//! Parses the command line, runs the selected command, and renders failures
//! through [`user_friendly_error`] before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use locker_gen::cli;
use locker_gen::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
