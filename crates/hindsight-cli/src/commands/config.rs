//! Configuration commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::app::App;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
}

pub fn execute(app: &App, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = &app.config;
            let config_path = config.config_path();
            let file_state = if config_path.exists() {
                "present".green()
            } else {
                "not found, using defaults".dimmed()
            };

            println!("{}", "Configuration".bold());
            println!("  {:<12} {}", "API URL", config.api_url.cyan());
            println!("  {:<12} {}", "Data dir", config.data_dir.display());
            println!("  {:<12} {} ({})", "Config file", config_path.display(), file_state);
            println!("  {:<12} {}", "Session", config.session_path().display());
            println!(
                "  {:<12} {}",
                "Signed in",
                if app.auth.is_authenticated() {
                    "yes".green()
                } else {
                    "no".dimmed()
                }
            );
        }
    }
    Ok(())
}
