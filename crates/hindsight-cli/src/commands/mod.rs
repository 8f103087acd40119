//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::App;

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod decision;
pub mod open;

/// Hindsight - record decisions and learn from how they turned out
#[derive(Parser)]
#[command(name = "hindsight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend API root (e.g. http://localhost:5000/api). Overrides HINDSIGHT_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding config.toml and the stored session (defaults to ~/.hindsight)
    #[arg(long, global = true, env = "HINDSIGHT_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Never prompt; missing form values stay empty
    #[arg(long, global = true)]
    pub no_input: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register(auth::RegisterArgs),

    /// Sign in and store the session
    Login(auth::LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Decision list with totals
    Dashboard,

    /// Decision management
    #[command(subcommand)]
    Decision(decision::DecisionCommands),

    /// Navigate to a view by path (e.g. /decisions/new)
    Open(open::OpenArgs),

    /// Configuration
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let app = App::new(self.api_url, self.data_dir, !self.no_input)?;

        match self.command {
            Commands::Register(args) => auth::register(&app, args).await,
            Commands::Login(args) => auth::login(&app, args).await,
            Commands::Logout => auth::logout(&app),
            Commands::Whoami => auth::whoami(&app),
            Commands::Dashboard => dashboard::execute(&app).await,
            Commands::Decision(cmd) => decision::execute(&app, cmd).await,
            Commands::Open(args) => open::execute(&app, args).await,
            Commands::Config(cmd) => config::execute(&app, cmd),
        }
    }
}
