//! # Hindsight Views
//!
//! Rendering-agnostic view models. Each view owns its local UI state (form,
//! loading flag, error string), delegates persistence to the client seams and
//! answers with the next [`Route`](hindsight_core::routes::Route) when an
//! interaction navigates.

pub mod dashboard;
pub mod decision_detail;
pub mod decision_form;
pub mod login;
pub mod nav;
pub mod outcome_form;
pub mod register;

#[cfg(test)]
mod testing;

pub use dashboard::DashboardView;
pub use decision_detail::DecisionDetailView;
pub use decision_form::DecisionFormView;
pub use login::LoginView;
pub use nav::NavBar;
pub use outcome_form::OutcomeFormView;
pub use register::RegisterView;

use hindsight_client::ClientError;

/// Text shown for a failed request: the server's message, else the fallback.
pub(crate) fn error_text(err: &ClientError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}
