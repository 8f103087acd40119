//! Outcome recording form.

use hindsight_client::DecisionApi;
use hindsight_core::decision::model::{Decision, OutcomeUpdate, SuccessLevel};
use hindsight_core::forms::{FormArray, FormControl, FormGroup, Validator};
use hindsight_core::routes::Route;
use hindsight_core::CoreResult;
use tracing::{info, warn};

pub const ACTUAL_OUTCOME: &str = "actualOutcome";
pub const SUCCESS_LEVEL: &str = "successLevel";

const FALLBACK_ERROR: &str = "Failed to save outcome. Please try again.";

#[derive(Debug, Clone)]
pub struct OutcomeFormView {
    pub form: FormGroup,
    pub unexpected_factors: FormArray,
    decision: Option<Decision>,
    is_loading: bool,
    error_message: Option<String>,
}

impl OutcomeFormView {
    pub fn new() -> Self {
        let form = FormGroup::new()
            .control(
                ACTUAL_OUTCOME,
                FormControl::new(vec![Validator::Required])
                    .with_message("Actual outcome is required."),
            )
            .control(
                SUCCESS_LEVEL,
                FormControl::new(vec![Validator::IntRange {
                    min: i64::from(SuccessLevel::MIN),
                    max: i64::from(SuccessLevel::MAX),
                }])
                .with_message("Success level must be between 1 and 5."),
            );
        Self {
            form,
            unexpected_factors: FormArray::new(),
            decision: None,
            is_loading: false,
            error_message: None,
        }
    }

    /// Load the decision the outcome belongs to (shown as the form header).
    pub async fn load(&mut self, api: &dyn DecisionApi, id: &str) {
        self.is_loading = true;
        match api.get(id).await {
            Ok(decision) => {
                self.decision = Some(decision);
                self.error_message = None;
            }
            Err(e) => {
                warn!(error = %e, id = %id, "failed to load decision for outcome form");
                self.error_message = Some("Failed to load decision data.".to_string());
            }
        }
        self.is_loading = false;
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    pub fn set_actual_outcome(&mut self, value: impl Into<String>) {
        self.form.set_value(ACTUAL_OUTCOME, value);
    }

    /// Empty string clears the level.
    pub fn set_success_level(&mut self, value: impl Into<String>) {
        self.form.set_value(SUCCESS_LEVEL, value);
    }

    pub fn add_factor(&mut self, value: impl Into<String>) -> usize {
        self.unexpected_factors.push(value)
    }

    pub fn remove_factor(&mut self, index: usize) -> Option<String> {
        self.unexpected_factors.remove_at(index)
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

    /// The outcome payload built from the current form state.
    pub fn payload(&self) -> CoreResult<OutcomeUpdate> {
        let raw_level = self.form.value(SUCCESS_LEVEL).trim();
        let success_level = if raw_level.is_empty() {
            None
        } else {
            let level: i64 = raw_level.parse().map_err(|_| {
                hindsight_core::CoreError::validation("success level must be a number")
            })?;
            Some(SuccessLevel::new(level)?)
        };
        Ok(OutcomeUpdate {
            actual_outcome: self.form.value(ACTUAL_OUTCOME).trim().to_string(),
            success_level,
            unexpected_factors: self.unexpected_factors.cleaned(),
        })
    }

    /// Validate and save. Navigates back to the decision on success.
    pub async fn submit(&mut self, api: &dyn DecisionApi) -> Option<Route> {
        let id = self.decision.as_ref().and_then(|d| d.id.clone());
        let (Some(id), true) = (id, self.form.is_valid()) else {
            self.form.mark_all_as_touched();
            return None;
        };
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.form.mark_all_as_touched();
                self.error_message = Some(e.to_string());
                return None;
            }
        };

        self.is_loading = true;
        self.error_message = None;
        let result = api.update_outcome(&id, &payload).await;
        self.is_loading = false;

        match result {
            Ok(decision) => {
                info!(id = %id, "outcome recorded");
                Some(Route::DecisionDetail(decision.id.unwrap_or(id)))
            }
            Err(e) => {
                warn!(error = %e, id = %id, "failed to record outcome");
                self.error_message = Some(crate::error_text(&e, FALLBACK_ERROR));
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        match self.decision.as_ref().and_then(|d| d.id.clone()) {
            Some(id) => Route::DecisionDetail(id),
            None => Route::Dashboard,
        }
    }
}

impl Default for OutcomeFormView {
    fn default() -> Self {
        Self::new()
    }
}
