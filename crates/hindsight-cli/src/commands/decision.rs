//! Decision management commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use hindsight_core::routes::Route;
use hindsight_views::{DecisionDetailView, DecisionFormView, OutcomeFormView};
use tracing::warn;

use crate::app::App;
use crate::output;

#[derive(Subcommand)]
pub enum DecisionCommands {
    /// Record a new decision
    New(NewDecisionArgs),

    /// Show a decision with its outcome and analysis
    Show(IdArgs),

    /// Record how a decision turned out
    Outcome(OutcomeArgs),

    /// Ask the backend to analyse a decision
    Analyze(IdArgs),

    /// Delete a decision
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct NewDecisionArgs {
    /// What was decided
    #[arg(short, long)]
    pub title: Option<String>,

    /// Situation at the time of the decision
    #[arg(short, long)]
    pub context: Option<String>,

    /// Why this option was chosen
    #[arg(short, long)]
    pub reasoning: Option<String>,

    /// An assumption the decision relies on (repeatable)
    #[arg(short, long)]
    pub assumption: Vec<String>,

    /// Expected outcome
    #[arg(short, long)]
    pub expected: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Decision ID
    pub id: String,
}

#[derive(Args)]
pub struct OutcomeArgs {
    /// Decision ID
    pub id: String,

    /// What actually happened
    #[arg(short, long)]
    pub actual: Option<String>,

    /// Success level from 1 (complete failure) to 5 (complete success)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub success_level: Option<u8>,

    /// Something that influenced the result unexpectedly (repeatable)
    #[arg(short, long)]
    pub factor: Vec<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Decision ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn execute(app: &App, cmd: DecisionCommands) -> Result<()> {
    match cmd {
        DecisionCommands::New(args) => {
            if !app.admit(&Route::NewDecision).await? {
                return Ok(());
            }
            let mut view = DecisionFormView::new();
            if let Some(title) = args.title {
                view.set_title(title);
            }
            if let Some(context) = args.context {
                view.set_context(context);
            }
            if let Some(reasoning) = args.reasoning {
                view.set_reasoning(reasoning);
            }
            for assumption in args.assumption {
                view.add_assumption(assumption);
            }
            if let Some(expected) = args.expected {
                view.set_expected_outcome(expected);
            }

            let next = app.run_new_decision(view).await?;
            app.follow(next).await
        }

        DecisionCommands::Show(args) => app.navigate(Route::DecisionDetail(args.id)).await,

        DecisionCommands::Outcome(args) => {
            let route = Route::RecordOutcome(args.id.clone());
            if !app.admit(&route).await? {
                return Ok(());
            }
            let mut view = OutcomeFormView::new();
            if let Some(actual) = args.actual {
                view.set_actual_outcome(actual);
            }
            if let Some(level) = args.success_level {
                view.set_success_level(level.to_string());
            }
            for factor in args.factor {
                view.add_factor(factor);
            }

            let next = app.run_outcome(view, &args.id).await?;
            app.follow(next).await
        }

        DecisionCommands::Analyze(args) => analyze(app, &args.id).await,

        DecisionCommands::Delete(args) => delete(app, args).await,
    }
}

async fn analyze(app: &App, id: &str) -> Result<()> {
    if !app.admit(&Route::DecisionDetail(id.to_string())).await? {
        return Ok(());
    }

    let mut view = DecisionDetailView::new();
    let spinner = output::spinner("Loading decision...");
    view.load(&app.decisions, id).await;
    spinner.finish_and_clear();

    let Some(decision) = view.decision() else {
        output::failure(view.error_message().unwrap_or("Decision not found"));
        return Ok(());
    };
    if !decision.has_outcome() {
        output::failure("Record the actual outcome before requesting an analysis.");
        println!(
            "Run {}",
            format!("hindsight decision outcome {id}").cyan()
        );
        return Ok(());
    }
    if decision.has_analysis() {
        output::notice("This decision has already been analyzed.");
        output::print_decision(decision);
        return Ok(());
    }

    let spinner = output::spinner("Requesting analysis...");
    let accepted = view.trigger_analysis(&app.decisions).await;
    spinner.finish_and_clear();

    if !accepted {
        output::failure(view.error_message().unwrap_or("Failed to trigger analysis."));
        return Ok(());
    }

    output::success("Analysis requested");
    match view.decision() {
        Some(decision) if decision.has_analysis() => output::print_decision(decision),
        _ => println!(
            "The analysis is not ready yet. Check again with {}",
            format!("hindsight decision show {id}").cyan()
        ),
    }
    Ok(())
}

async fn delete(app: &App, args: DeleteArgs) -> Result<()> {
    if !app.admit(&Route::DecisionDetail(args.id.clone())).await? {
        return Ok(());
    }

    if !args.yes {
        if !app.prompt.is_interactive() {
            bail!("Refusing to delete without confirmation. Pass --yes to proceed.");
        }
        if !app.prompt.confirm(&format!("Delete decision {}?", args.id))? {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }
    }

    let spinner = output::spinner("Deleting decision...");
    let result = app.decisions.delete(&args.id).await;
    spinner.finish_and_clear();

    match result {
        Ok(ack) => {
            output::success(ack.message.as_deref().unwrap_or("Decision deleted"));
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, id = %args.id, "failed to delete decision");
            output::failure(e.server_message().unwrap_or("Failed to delete decision."));
            Ok(())
        }
    }
}
