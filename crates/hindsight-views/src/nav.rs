//! Top navigation: links shown only to signed-in users, plus logout.

use hindsight_client::{AuthApi, ClientResult};
use hindsight_core::auth::User;
use hindsight_core::routes::Route;

pub const BRAND: &str = "AI Decision Tracker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub authenticated: bool,
    pub user: Option<User>,
}

impl NavBar {
    pub fn from_auth(auth: &dyn AuthApi) -> Self {
        Self {
            authenticated: auth.is_authenticated(),
            user: auth.current_user(),
        }
    }

    /// `(label, route)` pairs; empty when signed out.
    pub fn links(&self) -> Vec<(&'static str, Route)> {
        if !self.authenticated {
            return Vec::new();
        }
        vec![
            ("Dashboard", Route::Dashboard),
            ("New Decision", Route::NewDecision),
        ]
    }

    /// Clear the session. The bar reflects the signed-out state afterwards.
    pub fn logout(&mut self, auth: &dyn AuthApi) -> ClientResult<()> {
        auth.logout()?;
        *self = Self::from_auth(auth);
        Ok(())
    }
}
