//! Authentication client.
//!
//! Talks to `<api_url>/users`, persists the bearer token and the cached user
//! in a [`KeyValueStore`] and publishes the current user on login and logout.

use std::sync::Arc;

use hindsight_core::auth::{AuthResponse, Credentials, Registration, User};
use hindsight_core::routes::AuthState;
use hindsight_core::session::{CurrentUserReceiver, CurrentUserStore};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http;
use crate::storage::KeyValueStore;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user.
pub const USER_KEY: &str = "user";

/// Client for the account endpoints. Cheap to clone.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn KeyValueStore>,
    current_user: CurrentUserStore,
}

impl AuthClient {
    /// Create a client; the current-user store starts from what storage holds.
    pub fn new(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let initial = read_user(storage.as_ref());
        Ok(Self {
            http: http::build_client()?,
            base_url: config.users_url(),
            storage,
            current_user: CurrentUserStore::new(initial),
        })
    }

    /// Create an account. Nothing is persisted.
    pub async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        let url = http::endpoint(&self.base_url, &["register"])?;
        debug!(url = %url, username = %registration.username, "registering account");

        let response = self.http.post(url).json(registration).send().await?;
        let body: AuthResponse = http::read_json(response).await?;

        info!(username = %body.user.username, "account registered");
        Ok(body)
    }

    /// Sign in. On success the token and user are persisted and published.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let url = http::endpoint(&self.base_url, &["login"])?;
        debug!(url = %url, email = %credentials.email, "logging in");

        let response = self.http.post(url).json(credentials).send().await?;
        let body: AuthResponse = http::read_json(response).await?;

        if body.token.is_empty() {
            warn!("login response carried no token; session not stored");
            return Ok(body);
        }

        // User first: the token alone marks the session as signed in.
        self.storage.set_item(USER_KEY, &serde_json::to_string(&body.user)?)?;
        if let Err(e) = self.storage.set_item(TOKEN_KEY, &body.token) {
            if let Err(cleanup) = self.storage.remove_item(USER_KEY) {
                warn!(error = %cleanup, "failed to roll back stored user");
            }
            return Err(e);
        }
        self.current_user.publish(Some(body.user.clone()));

        info!(username = %body.user.username, "logged in");
        Ok(body)
    }

    /// Forget the stored session and publish `None`.
    pub fn logout(&self) -> ClientResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        self.current_user.publish(None);
        info!("logged out");
        Ok(())
    }

    /// True iff a non-empty token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Read-through accessor for the stored token.
    pub fn token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read stored token");
                None
            }
        }
    }

    /// Read-through accessor for the stored user.
    pub fn current_user(&self) -> Option<User> {
        read_user(self.storage.as_ref())
    }

    /// Observe sign-in / sign-out.
    pub fn subscribe(&self) -> CurrentUserReceiver {
        self.current_user.subscribe()
    }

    pub fn current_user_store(&self) -> &CurrentUserStore {
        &self.current_user
    }
}

impl AuthState for AuthClient {
    fn is_authenticated(&self) -> bool {
        AuthClient::is_authenticated(self)
    }
}

fn read_user(storage: &dyn KeyValueStore) -> Option<User> {
    let raw = match storage.get_item(USER_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(error = %e, "failed to read stored user");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "stored user is not valid JSON; ignoring");
            None
        }
    }
}
