//! Decision client.
//!
//! Every call re-fetches; there is no caching and no optimistic update.
//! [`DecisionClient::analyze`] only triggers the server-side analysis and
//! returns its acknowledgement: callers re-query the decision to observe the
//! result once the server has attached it.

use hindsight_core::decision::model::{Acknowledgement, Decision, NewDecision, OutcomeUpdate};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use tracing::debug;

use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http;

/// Client for `<api_url>/decisions`. Cheap to clone.
#[derive(Clone)]
pub struct DecisionClient {
    http: reqwest::Client,
    base_url: String,
    auth: AuthClient,
}

impl DecisionClient {
    pub fn new(config: &ClientConfig, auth: AuthClient) -> ClientResult<Self> {
        Ok(Self {
            http: http::build_client()?,
            base_url: config.decisions_url(),
            auth,
        })
    }

    /// JSON request carrying the bearer header when a token is stored.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match self.auth.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn create(&self, decision: &NewDecision) -> ClientResult<Decision> {
        let url = http::endpoint(&self.base_url, &[])?;
        debug!(url = %url, title = %decision.title, "creating decision");
        let response = self.request(Method::POST, url).json(decision).send().await?;
        http::read_json(response).await
    }

    pub async fn list(&self) -> ClientResult<Vec<Decision>> {
        let url = http::endpoint(&self.base_url, &[])?;
        debug!(url = %url, "listing decisions");
        let response = self.request(Method::GET, url).send().await?;
        let decisions: Vec<Decision> = http::read_json(response).await?;
        debug!(count = decisions.len(), "decisions fetched");
        Ok(decisions)
    }

    pub async fn get(&self, id: &str) -> ClientResult<Decision> {
        let url = http::endpoint(&self.base_url, &[id])?;
        debug!(url = %url, "fetching decision");
        let response = self.request(Method::GET, url).send().await?;
        http::read_json(response).await
    }

    pub async fn update_outcome(
        &self,
        id: &str,
        outcome: &OutcomeUpdate,
    ) -> ClientResult<Decision> {
        let url = http::endpoint(&self.base_url, &[id, "outcome"])?;
        debug!(url = %url, success_level = ?outcome.success_level, "recording outcome");
        let response = self.request(Method::PUT, url).json(outcome).send().await?;
        http::read_json(response).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Acknowledgement> {
        let url = http::endpoint(&self.base_url, &[id])?;
        debug!(url = %url, "deleting decision");
        let response = self.request(Method::DELETE, url).send().await?;
        http::read_ack(response).await
    }

    /// Trigger the server-side analysis. Does not wait for it to complete.
    pub async fn analyze(&self, id: &str) -> ClientResult<Acknowledgement> {
        let url = http::endpoint(&self.base_url, &[id, "analyze"])?;
        debug!(url = %url, "triggering analysis");
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        http::read_ack(response).await
    }
}
