//! Login view.

use hindsight_client::AuthApi;
use hindsight_core::auth::Credentials;
use hindsight_core::forms::{FormControl, FormGroup, Validator};
use hindsight_core::routes::Route;
use tracing::warn;

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

const FALLBACK_ERROR: &str = "Login failed. Please try again.";

/// Email + password sign-in form.
#[derive(Debug, Clone)]
pub struct LoginView {
    pub form: FormGroup,
    is_loading: bool,
    error_message: Option<String>,
}

impl LoginView {
    pub fn new() -> Self {
        let form = FormGroup::new()
            .control(
                EMAIL,
                FormControl::new(vec![Validator::Required, Validator::Email])
                    .with_message("Email is required and must be valid."),
            )
            .control(
                PASSWORD,
                FormControl::new(vec![Validator::Required]).with_message("Password is required."),
            );
        Self {
            form,
            is_loading: false,
            error_message: None,
        }
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

    /// Mirrors the disabled state of the submit button.
    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.is_loading
    }

    /// Validate and sign in. Returns the dashboard route on success.
    pub async fn submit(&mut self, auth: &dyn AuthApi) -> Option<Route> {
        if !self.form.is_valid() {
            self.form.mark_all_as_touched();
            return None;
        }

        self.is_loading = true;
        self.error_message = None;

        let credentials = Credentials {
            email: self.form.value(EMAIL).trim().to_string(),
            password: self.form.value(PASSWORD).to_string(),
        };
        let result = auth.login(&credentials).await;
        self.is_loading = false;

        match result {
            Ok(_) => Some(Route::Dashboard),
            Err(e) => {
                warn!(error = %e, "login failed");
                self.error_message = Some(crate::error_text(&e, FALLBACK_ERROR));
                None
            }
        }
    }
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}
