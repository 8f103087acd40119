//! Registration view.

use hindsight_client::AuthApi;
use hindsight_core::auth::Registration;
use hindsight_core::forms::{FormControl, FormGroup, Validator};
use hindsight_core::routes::Route;
use tracing::{info, warn};

pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 6;

const FALLBACK_ERROR: &str = "Registration failed. Please try again.";

/// Account creation form.
#[derive(Debug, Clone)]
pub struct RegisterView {
    pub form: FormGroup,
    is_loading: bool,
    error_message: Option<String>,
}

impl RegisterView {
    pub fn new() -> Self {
        let form = FormGroup::new()
            .control(
                USERNAME,
                FormControl::new(vec![
                    Validator::Required,
                    Validator::MinLength(USERNAME_MIN),
                    Validator::MaxLength(USERNAME_MAX),
                ])
                .with_message("Username is required (3-30 characters)."),
            )
            .control(
                EMAIL,
                FormControl::new(vec![Validator::Required, Validator::Email])
                    .with_message("Valid email is required."),
            )
            .control(
                PASSWORD,
                FormControl::new(vec![Validator::Required, Validator::MinLength(PASSWORD_MIN)])
                    .with_message("Password must be at least 6 characters."),
            );
        Self {
            form,
            is_loading: false,
            error_message: None,
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.form.set_value(USERNAME, username);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.set_value(EMAIL, email);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.set_value(PASSWORD, password);
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.is_loading
    }

    /// Validate and create the account.
    ///
    /// Navigates to the dashboard on success. Registration stores no session,
    /// so the route guard decides whether the dashboard is reachable.
    pub async fn submit(&mut self, auth: &dyn AuthApi) -> Option<Route> {
        if !self.form.is_valid() {
            self.form.mark_all_as_touched();
            return None;
        }

        self.is_loading = true;
        self.error_message = None;

        let registration = Registration {
            username: self.form.value(USERNAME).trim().to_string(),
            email: self.form.value(EMAIL).trim().to_string(),
            password: self.form.value(PASSWORD).to_string(),
        };
        let result = auth.register(&registration).await;
        self.is_loading = false;

        match result {
            Ok(response) => {
                info!(username = %response.user.username, "registration accepted");
                Some(Route::Dashboard)
            }
            Err(e) => {
                warn!(error = %e, "registration failed");
                self.error_message = Some(crate::error_text(&e, FALLBACK_ERROR));
                None
            }
        }
    }
}

impl Default for RegisterView {
    fn default() -> Self {
        Self::new()
    }
}
