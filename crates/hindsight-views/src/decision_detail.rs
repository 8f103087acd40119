//! Decision detail view with its derived actions.
//!
//! Triggering analysis follows a trigger-then-re-query contract: the trigger
//! call only returns the server's acknowledgement, and the view reloads the
//! decision afterwards to pick up whatever the server has attached by then.

use hindsight_client::DecisionApi;
use hindsight_core::decision::model::{success_level_label, Decision};
use hindsight_core::routes::Route;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct DecisionDetailView {
    decision: Option<Decision>,
    is_loading: bool,
    error_message: Option<String>,
}

impl DecisionDetailView {
    pub fn new() -> Self {
        Self {
            decision: None,
            is_loading: true,
            error_message: None,
        }
    }

    pub async fn load(&mut self, api: &dyn DecisionApi, id: &str) {
        self.is_loading = true;
        match api.get(id).await {
            Ok(decision) => {
                self.decision = Some(decision);
                self.error_message = None;
            }
            Err(e) => {
                warn!(error = %e, id = %id, "failed to load decision");
                self.error_message = Some("Failed to load decision".to_string());
            }
        }
        self.is_loading = false;
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Nothing to show once loading has finished.
    pub fn is_not_found(&self) -> bool {
        self.decision.is_none() && !self.is_loading
    }

    pub fn success_level_text(&self) -> Option<&'static str> {
        self.decision
            .as_ref()
            .and_then(|d| d.success_level)
            .map(success_level_label)
    }

    fn id(&self) -> Option<&str> {
        self.decision.as_ref().and_then(|d| d.id.as_deref())
    }

    /// Route to the outcome form, when the outcome is still missing.
    pub fn record_outcome(&self) -> Option<Route> {
        let decision = self.decision.as_ref()?;
        if !decision.can_record_outcome() {
            return None;
        }
        self.id().map(|id| Route::RecordOutcome(id.to_string()))
    }

    /// Ask the server to analyse the decision, then re-query it.
    ///
    /// Returns whether the trigger was accepted. The analysis is visible only
    /// if the server had attached it by the time of the reload.
    pub async fn trigger_analysis(&mut self, api: &dyn DecisionApi) -> bool {
        let Some(id) = self.id().map(str::to_string) else {
            return false;
        };
        if !self.decision.as_ref().is_some_and(Decision::can_trigger_analysis) {
            return false;
        }

        match api.analyze(&id).await {
            Ok(ack) => {
                info!(id = %id, message = ?ack.message, "analysis triggered");
                self.load(api, &id).await;
                true
            }
            Err(e) => {
                warn!(error = %e, id = %id, "failed to trigger analysis");
                self.error_message = Some(crate::error_text(&e, "Failed to trigger analysis."));
                false
            }
        }
    }

    pub fn go_back(&self) -> Route {
        Route::Dashboard
    }
}

impl Default for DecisionDetailView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{decision, FakeDecisions};
    use hindsight_client::ClientError;

    #[tokio::test]
    async fn test_load_and_pending_actions() {
        let api = FakeDecisions::with(vec![decision("d1", None)]);
        let mut view = DecisionDetailView::new();
        view.load(&api, "d1").await;

        assert!(!view.is_loading());
        assert_eq!(view.decision().map(|d| d.title.as_str()), Some("Decision d1"));
        assert_eq!(view.record_outcome(), Some(Route::RecordOutcome("d1".to_string())));
        assert!(!view.trigger_analysis(&api).await);
        assert!(!api.calls().contains(&"analyze".to_string()));
    }

    #[tokio::test]
    async fn test_missing_decision() {
        let api = FakeDecisions::default();
        let mut view = DecisionDetailView::new();
        assert!(!view.is_not_found());
        view.load(&api, "nope").await;
        assert!(view.is_not_found());
        assert_eq!(view.error_message(), Some("Failed to load decision"));
        assert_eq!(view.record_outcome(), None);
    }

    #[tokio::test]
    async fn test_success_level_text() {
        let mut d = decision("d1", Some("ok"));
        d.success_level = Some(4);
        let api = FakeDecisions::with(vec![d]);
        let mut view = DecisionDetailView::new();
        view.load(&api, "d1").await;
        assert_eq!(view.success_level_text(), Some("Mostly Successful"));
        assert_eq!(view.record_outcome(), None);
    }

    #[tokio::test]
    async fn test_trigger_then_requery() {
        let api = FakeDecisions::with(vec![decision("d1", Some("it worked"))]);
        let mut view = DecisionDetailView::new();
        view.load(&api, "d1").await;
        assert!(view.decision().unwrap().ai_analysis.is_none());

        assert!(view.trigger_analysis(&api).await);

        assert_eq!(api.calls(), vec!["get", "analyze", "get"]);
        assert!(view.decision().unwrap().has_analysis());
        assert!(!view.decision().unwrap().can_trigger_analysis());
    }

    #[tokio::test]
    async fn test_analyze_does_not_populate_without_refetch() {
        let api = FakeDecisions::with(vec![decision("d1", Some("it worked"))]);
        api.analyze("d1").await.unwrap();
        let stored = api.decisions.lock().unwrap()[0].clone();
        assert!(stored.ai_analysis.is_none());
    }

    #[tokio::test]
    async fn test_trigger_failure_keeps_decision() {
        let api = FakeDecisions::with(vec![decision("d1", Some("it worked"))]);
        let mut view = DecisionDetailView::new();
        view.load(&api, "d1").await;
        *api.fail_with.lock().unwrap() = Some(ClientError::from_response(
            503,
            r#"{"message":"Analysis service unavailable"}"#,
        ));

        assert!(!view.trigger_analysis(&api).await);
        assert_eq!(view.error_message(), Some("Analysis service unavailable"));
        assert!(view.decision().is_some());
    }

    #[test]
    fn test_back() {
        assert_eq!(DecisionDetailView::new().go_back(), Route::Dashboard);
    }
}
