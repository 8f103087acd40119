//! Dashboard view: the decision list and its counts.

use hindsight_client::DecisionApi;
use hindsight_core::decision::model::Decision;
use hindsight_core::decision::DashboardStats;
use hindsight_core::routes::Route;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct DashboardView {
    decisions: Vec<Decision>,
    stats: DashboardStats,
    is_loading: bool,
    error_message: Option<String>,
}

impl DashboardView {
    /// A fresh dashboard starts in the loading state.
    pub fn new() -> Self {
        Self {
            decisions: Vec::new(),
            stats: DashboardStats::default(),
            is_loading: true,
            error_message: None,
        }
    }

    /// Fetch the list and recompute the counts.
    pub async fn load(&mut self, api: &dyn DecisionApi) {
        self.is_loading = true;
        self.error_message = None;

        match api.list().await {
            Ok(decisions) => {
                self.stats = DashboardStats::from_decisions(&decisions);
                self.decisions = decisions;
                debug!(total = self.stats.total, "dashboard loaded");
            }
            Err(e) => {
                warn!(error = %e, "failed to load decisions");
                self.error_message = Some(crate::error_text(&e, "Failed to load decisions."));
            }
        }
        self.is_loading = false;
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Loaded, and nothing recorded yet.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.decisions.is_empty()
    }

    pub fn create_decision(&self) -> Route {
        Route::NewDecision
    }

    pub fn view_decision(&self, id: &str) -> Route {
        Route::DecisionDetail(id.to_string())
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{decision, FakeDecisions};
    use hindsight_client::ClientError;
    use hindsight_core::decision::model::AiAnalysis;

    #[tokio::test]
    async fn test_counts_follow_fetched_list() {
        let mut analysed = decision("d3", Some("fine"));
        analysed.ai_analysis = Some(AiAnalysis::default());
        let api = FakeDecisions::with(vec![
            decision("d1", None),
            decision("d2", Some("meh")),
            analysed,
        ]);

        let mut view = DashboardView::new();
        assert!(view.is_loading());
        view.load(&api).await;

        assert!(!view.is_loading());
        assert_eq!(view.decisions().len(), 3);
        assert_eq!(
            view.stats(),
            DashboardStats {
                total: 3,
                outcomes_recorded: 2,
                ai_analyses: 1
            }
        );
    }

    #[tokio::test]
    async fn test_empty_list() {
        let api = FakeDecisions::default();
        let mut view = DashboardView::new();
        view.load(&api).await;
        assert!(view.is_empty());
        assert_eq!(view.stats(), DashboardStats::default());
    }

    #[tokio::test]
    async fn test_counts_recomputed_on_every_fetch() {
        let api = FakeDecisions::with(vec![decision("d1", None)]);
        let mut view = DashboardView::new();
        view.load(&api).await;
        assert_eq!(view.stats().total, 1);

        api.decisions.lock().unwrap().push(decision("d2", Some("done")));
        view.load(&api).await;
        assert_eq!(view.stats().total, 2);
        assert_eq!(view.stats().outcomes_recorded, 1);
        assert_eq!(api.calls(), vec!["list", "list"]);
    }

    #[tokio::test]
    async fn test_failure_clears_loading() {
        let api = FakeDecisions::failing(ClientError::from_response(500, ""));
        let mut view = DashboardView::new();
        view.load(&api).await;
        assert!(!view.is_loading());
        assert_eq!(view.error_message(), Some("Failed to load decisions."));
    }

    #[test]
    fn test_navigation() {
        let view = DashboardView::new();
        assert_eq!(view.create_decision(), Route::NewDecision);
        assert_eq!(view.view_decision("d9"), Route::DecisionDetail("d9".to_string()));
    }
}
