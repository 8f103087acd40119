//! Account commands.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hindsight_views::{LoginView, NavBar, RegisterView};

use crate::app::App;
use crate::output;

#[derive(Args)]
pub struct RegisterArgs {
    /// Username (3-30 characters)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (at least 6 characters)
    #[arg(short, long, env = "HINDSIGHT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password
    #[arg(short, long, env = "HINDSIGHT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let mut view = RegisterView::new();
    if let Some(username) = args.username {
        view.set_username(username);
    }
    if let Some(email) = args.email {
        view.set_email(email);
    }
    if let Some(password) = args.password {
        view.set_password(password);
    }

    let next = app.run_register(view).await?;
    app.follow(next).await
}

pub async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let mut view = LoginView::new();
    if let Some(email) = args.email {
        view.set_email(email);
    }
    if let Some(password) = args.password {
        view.set_password(password);
    }

    let next = app.run_login(view).await?;
    app.follow(next).await
}

pub fn logout(app: &App) -> Result<()> {
    let mut nav = NavBar::from_auth(&app.auth);
    if !nav.authenticated {
        println!("{}", "Not logged in.".dimmed());
        return Ok(());
    }
    nav.logout(&app.auth)?;
    output::success("Logged out");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let nav = NavBar::from_auth(&app.auth);
    match (&nav.user, nav.authenticated) {
        (Some(user), true) => {
            println!("{} {}", user.username.cyan().bold(), format!("<{}>", user.email).dimmed());
            if let Some(id) = &user.id {
                println!("{}: {}", "ID".bold(), id);
            }
        }
        (None, true) => println!("Logged in (no profile stored)"),
        _ => {
            println!("{}", "Not logged in.".dimmed());
            println!("Run {} to sign in.", "hindsight login".cyan());
        }
    }
    Ok(())
}
