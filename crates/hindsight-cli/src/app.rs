//! Session wiring and route navigation for the terminal client.
//!
//! Each route is rendered by running its view model once: forms are filled
//! from flags and prompts, then submitted. A view that navigates hands the
//! next route back to [`App::navigate`], which applies the guard before
//! rendering it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use hindsight_client::{AuthClient, ClientConfig, DecisionClient, FileStore};
use hindsight_core::routes::{guard, GuardDecision, Route};
use hindsight_views::{
    decision_form, login, outcome_form, register, DashboardView, DecisionDetailView,
    DecisionFormView, LoginView, NavBar, OutcomeFormView, RegisterView,
};
use tracing::debug;

use crate::output;
use crate::prompt::Prompter;

pub struct App {
    pub config: ClientConfig,
    pub auth: AuthClient,
    pub decisions: DecisionClient,
    pub prompt: Prompter,
}

impl App {
    pub fn new(
        api_url: Option<String>,
        data_dir: Option<PathBuf>,
        interactive: bool,
    ) -> Result<Self> {
        let config =
            ClientConfig::load(api_url, data_dir).context("Failed to load configuration")?;
        debug!(
            api_url = %config.api_url,
            data_dir = %config.data_dir.display(),
            "configuration loaded"
        );

        let storage = Arc::new(FileStore::new(config.session_path()));
        let auth = AuthClient::new(&config, storage).context("Failed to create HTTP client")?;
        let decisions =
            DecisionClient::new(&config, auth.clone()).context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            auth,
            decisions,
            prompt: Prompter::new(interactive),
        })
    }

    /// Render `route` and keep following navigation until a view settles.
    pub async fn navigate(&self, route: Route) -> Result<()> {
        let mut next = Some(route);
        while let Some(route) = next.take() {
            next = match guard(route, &self.auth) {
                GuardDecision::Allow(route) => {
                    debug!(route = %route, "rendering");
                    self.show(route).await?
                }
                GuardDecision::Redirect(to) => {
                    output::notice("Please log in to continue.");
                    Some(to)
                }
            };
        }
        Ok(())
    }

    /// Continue from a view's answer, if it navigated.
    pub async fn follow(&self, next: Option<Route>) -> Result<()> {
        match next {
            Some(route) => self.navigate(route).await,
            None => Ok(()),
        }
    }

    /// Guard check for commands that render a pre-filled view themselves.
    /// On redirect the login screen is shown instead and `false` returned.
    pub async fn admit(&self, route: &Route) -> Result<bool> {
        match guard(route.clone(), &self.auth) {
            GuardDecision::Allow(_) => Ok(true),
            GuardDecision::Redirect(to) => {
                output::notice("Please log in to continue.");
                self.navigate(to).await?;
                Ok(false)
            }
        }
    }

    async fn show(&self, route: Route) -> Result<Option<Route>> {
        match route {
            Route::Login => self.run_login(LoginView::new()).await,
            Route::Register => self.run_register(RegisterView::new()).await,
            Route::Dashboard => self.show_dashboard().await.map(|()| None),
            Route::NewDecision => self.run_new_decision(DecisionFormView::new()).await,
            Route::DecisionDetail(id) => self.show_decision(&id).await.map(|()| None),
            Route::RecordOutcome(id) => self.run_outcome(OutcomeFormView::new(), &id).await,
        }
    }

    pub async fn run_login(&self, mut view: LoginView) -> Result<Option<Route>> {
        let email = self.prompt.text("Email", view.form.value(login::EMAIL))?;
        view.set_email(email);
        let password = self.prompt.password("Password", view.form.value(login::PASSWORD))?;
        view.set_password(password);

        let spinner = output::spinner("Signing in...");
        let next = view.submit(&self.auth).await;
        spinner.finish_and_clear();

        if next.is_some() {
            let name = self
                .auth
                .current_user()
                .map(|u| u.username)
                .unwrap_or_default();
            output::success(&format!("Logged in as {name}"));
        } else {
            report(view.error_message(), &view.form);
        }
        Ok(next)
    }

    pub async fn run_register(&self, mut view: RegisterView) -> Result<Option<Route>> {
        let username = self.prompt.text("Username", view.form.value(register::USERNAME))?;
        view.set_username(username);
        let email = self.prompt.text("Email", view.form.value(register::EMAIL))?;
        view.set_email(email);
        let password = self.prompt.password("Password", view.form.value(register::PASSWORD))?;
        view.set_password(password);

        let spinner = output::spinner("Creating account...");
        let next = view.submit(&self.auth).await;
        spinner.finish_and_clear();

        if next.is_some() {
            output::success("Account created");
        } else {
            report(view.error_message(), &view.form);
        }
        Ok(next)
    }

    pub async fn show_dashboard(&self) -> Result<()> {
        output::print_nav(&NavBar::from_auth(&self.auth));

        let mut view = DashboardView::new();
        let spinner = output::spinner("Loading decisions...");
        view.load(&self.decisions).await;
        spinner.finish_and_clear();

        if let Some(message) = view.error_message() {
            output::failure(message);
            return Ok(());
        }
        output::print_dashboard(&view);
        Ok(())
    }

    pub async fn run_new_decision(&self, mut view: DecisionFormView) -> Result<Option<Route>> {
        let title = self.prompt.text("Title", view.form.value(decision_form::TITLE))?;
        view.set_title(title);
        let context = self.prompt.text("Context", view.form.value(decision_form::CONTEXT))?;
        view.set_context(context);
        let reasoning = self.prompt.text("Reasoning", view.form.value(decision_form::REASONING))?;
        view.set_reasoning(reasoning);
        if view.assumptions.is_empty() {
            for assumption in self.prompt.list("Assumptions", Vec::new())? {
                view.add_assumption(assumption);
            }
        }
        let expected = self.prompt.text(
            "Expected outcome",
            view.form.value(decision_form::EXPECTED_OUTCOME),
        )?;
        view.set_expected_outcome(expected);

        let spinner = output::spinner("Saving decision...");
        let next = view.submit(&self.decisions).await;
        spinner.finish_and_clear();

        match &next {
            Some(Route::DecisionDetail(id)) => {
                output::success(&format!("Created decision: {}", view.payload().title));
                debug!(id = %id, "decision created");
            }
            Some(_) => output::success("Decision saved"),
            None => report(view.error_message(), &view.form),
        }
        Ok(next)
    }

    pub async fn show_decision(&self, id: &str) -> Result<()> {
        let mut view = DecisionDetailView::new();
        let spinner = output::spinner("Loading decision...");
        view.load(&self.decisions, id).await;
        spinner.finish_and_clear();

        match view.decision() {
            Some(decision) => output::print_decision(decision),
            None => {
                if let Some(message) = view.error_message() {
                    output::failure(message);
                }
                if view.is_not_found() {
                    output::failure("Decision not found");
                }
            }
        }
        Ok(())
    }

    pub async fn run_outcome(&self, mut view: OutcomeFormView, id: &str) -> Result<Option<Route>> {
        let spinner = output::spinner("Loading decision...");
        view.load(&self.decisions, id).await;
        spinner.finish_and_clear();

        let Some(decision) = view.decision() else {
            output::failure(view.error_message().unwrap_or("Decision not found"));
            return Ok(None);
        };
        output::notice(&format!("Recording outcome for: {}", decision.title));
        println!("Expected: {}", decision.expected_outcome);
        println!();

        let actual = self
            .prompt
            .text("Actual outcome", view.form.value(outcome_form::ACTUAL_OUTCOME))?;
        view.set_actual_outcome(actual);

        let current_level = view.form.value(outcome_form::SUCCESS_LEVEL).trim().to_string();
        if current_level.is_empty() {
            if let Some(level) = self.prompt.success_level(None)? {
                view.set_success_level(level.to_string());
            }
        }

        if view.unexpected_factors.is_empty() {
            for factor in self.prompt.list("Unexpected factors", Vec::new())? {
                view.add_factor(factor);
            }
        }

        let spinner = output::spinner("Saving outcome...");
        let next = view.submit(&self.decisions).await;
        spinner.finish_and_clear();

        if next.is_some() {
            output::success("Outcome recorded");
        } else {
            report(view.error_message(), &view.form);
        }
        Ok(next)
    }
}

/// Explain why a form did not submit.
fn report(error_message: Option<&str>, form: &hindsight_core::forms::FormGroup) {
    match error_message {
        Some(message) => output::failure(message),
        None => {
            output::failure("Please fix the following:");
            output::print_form_errors(form);
        }
    }
}
