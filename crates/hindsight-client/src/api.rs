//! Client seams consumed by view models.

use async_trait::async_trait;
use hindsight_core::auth::{AuthResponse, Credentials, Registration, User};
use hindsight_core::decision::model::{Acknowledgement, Decision, NewDecision, OutcomeUpdate};

use crate::auth::AuthClient;
use crate::decisions::DecisionClient;
use crate::error::ClientResult;

/// Account operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse>;
    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse>;
    fn logout(&self) -> ClientResult<()>;
    fn is_authenticated(&self) -> bool;
    fn current_user(&self) -> Option<User>;
}

/// Decision operations.
#[async_trait]
pub trait DecisionApi: Send + Sync {
    async fn create(&self, decision: &NewDecision) -> ClientResult<Decision>;
    async fn list(&self) -> ClientResult<Vec<Decision>>;
    async fn get(&self, id: &str) -> ClientResult<Decision>;
    async fn update_outcome(&self, id: &str, outcome: &OutcomeUpdate) -> ClientResult<Decision>;
    async fn delete(&self, id: &str) -> ClientResult<Acknowledgement>;
    async fn analyze(&self, id: &str) -> ClientResult<Acknowledgement>;
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        AuthClient::register(self, registration).await
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        AuthClient::login(self, credentials).await
    }

    fn logout(&self) -> ClientResult<()> {
        AuthClient::logout(self)
    }

    fn is_authenticated(&self) -> bool {
        AuthClient::is_authenticated(self)
    }

    fn current_user(&self) -> Option<User> {
        AuthClient::current_user(self)
    }
}

#[async_trait]
impl DecisionApi for DecisionClient {
    async fn create(&self, decision: &NewDecision) -> ClientResult<Decision> {
        DecisionClient::create(self, decision).await
    }

    async fn list(&self) -> ClientResult<Vec<Decision>> {
        DecisionClient::list(self).await
    }

    async fn get(&self, id: &str) -> ClientResult<Decision> {
        DecisionClient::get(self, id).await
    }

    async fn update_outcome(&self, id: &str, outcome: &OutcomeUpdate) -> ClientResult<Decision> {
        DecisionClient::update_outcome(self, id, outcome).await
    }

    async fn delete(&self, id: &str) -> ClientResult<Acknowledgement> {
        DecisionClient::delete(self, id).await
    }

    async fn analyze(&self, id: &str) -> ClientResult<Acknowledgement> {
        DecisionClient::analyze(self, id).await
    }
}
