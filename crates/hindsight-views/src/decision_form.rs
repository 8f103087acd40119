//! New-decision form.

use hindsight_client::DecisionApi;
use hindsight_core::decision::model::NewDecision;
use hindsight_core::forms::{FormArray, FormControl, FormGroup, Validator};
use hindsight_core::routes::Route;
use tracing::{info, warn};

pub const TITLE: &str = "title";
pub const CONTEXT: &str = "context";
pub const REASONING: &str = "reasoning";
pub const EXPECTED_OUTCOME: &str = "expectedOutcome";

const FALLBACK_ERROR: &str = "Failed to save decision. Please try again.";

#[derive(Debug, Clone)]
pub struct DecisionFormView {
    pub form: FormGroup,
    pub assumptions: FormArray,
    is_loading: bool,
    error_message: Option<String>,
}

impl DecisionFormView {
    pub fn new() -> Self {
        let required =
            |message: &str| FormControl::new(vec![Validator::Required]).with_message(message);
        let form = FormGroup::new()
            .control(TITLE, required("Title is required."))
            .control(CONTEXT, required("Context is required."))
            .control(REASONING, required("Reasoning is required."))
            .control(EXPECTED_OUTCOME, required("Expected outcome is required."));
        Self {
            form,
            assumptions: FormArray::new(),
            is_loading: false,
            error_message: None,
        }
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.form.set_value(TITLE, value);
    }

    pub fn set_context(&mut self, value: impl Into<String>) {
        self.form.set_value(CONTEXT, value);
    }

    pub fn set_reasoning(&mut self, value: impl Into<String>) {
        self.form.set_value(REASONING, value);
    }

    pub fn set_expected_outcome(&mut self, value: impl Into<String>) {
        self.form.set_value(EXPECTED_OUTCOME, value);
    }

    pub fn add_assumption(&mut self, value: impl Into<String>) -> usize {
        self.assumptions.push(value)
    }

    pub fn remove_assumption(&mut self, index: usize) -> Option<String> {
        self.assumptions.remove_at(index)
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

    /// The create payload built from the current form state.
    pub fn payload(&self) -> NewDecision {
        NewDecision {
            title: self.form.value(TITLE).trim().to_string(),
            context: self.form.value(CONTEXT).trim().to_string(),
            reasoning: self.form.value(REASONING).trim().to_string(),
            assumptions: self.assumptions.cleaned(),
            expected_outcome: self.form.value(EXPECTED_OUTCOME).trim().to_string(),
        }
    }

    /// Validate and create. Navigates to the new decision on success.
    pub async fn submit(&mut self, api: &dyn DecisionApi) -> Option<Route> {
        if !self.form.is_valid() {
            self.form.mark_all_as_touched();
            return None;
        }

        self.is_loading = true;
        self.error_message = None;
        let result = api.create(&self.payload()).await;
        self.is_loading = false;

        match result {
            Ok(decision) => {
                info!(id = ?decision.id, title = %decision.title, "decision created");
                Some(match decision.id {
                    Some(id) => Route::DecisionDetail(id),
                    None => Route::Dashboard,
                })
            }
            Err(e) => {
                warn!(error = %e, "failed to create decision");
                self.error_message = Some(crate::error_text(&e, FALLBACK_ERROR));
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::Dashboard
    }
}

impl Default for DecisionFormView {
    fn default() -> Self {
        Self::new()
    }
}
