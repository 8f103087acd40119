//! Application routes and the authentication guard in front of them.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Every navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    NewDecision,
    DecisionDetail(String),
    RecordOutcome(String),
}

impl Route {
    /// Views that require a stored token.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }

    /// Resolve a path the way the router does: the empty path and unknown
    /// paths land on the login view.
    pub fn resolve(path: &str) -> Self {
        path.parse().unwrap_or(Self::Login)
    }

    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "/login"),
            Self::Register => write!(f, "/register"),
            Self::Dashboard => write!(f, "/dashboard"),
            Self::NewDecision => write!(f, "/decisions/new"),
            Self::DecisionDetail(id) => write!(f, "/decisions/{id}"),
            Self::RecordOutcome(id) => write!(f, "/decisions/{id}/outcome"),
        }
    }
}

impl FromStr for Route {
    type Err = CoreError;

    /// Strict parse; `"/decisions/new"` wins over the `:id` pattern.
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["login"] => Ok(Self::Login),
            ["register"] => Ok(Self::Register),
            ["dashboard"] => Ok(Self::Dashboard),
            ["decisions", "new"] => Ok(Self::NewDecision),
            ["decisions", id] if !id.is_empty() => Ok(Self::DecisionDetail((*id).to_string())),
            ["decisions", id, "outcome"] if !id.is_empty() => {
                Ok(Self::RecordOutcome((*id).to_string()))
            }
            _ => Err(CoreError::UnknownRoute(path.to_string())),
        }
    }
}

/// Outcome of evaluating the guard for a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Route),
    Redirect(Route),
}

impl GuardDecision {
    /// The route that will actually be shown.
    pub fn into_route(self) -> Route {
        match self {
            Self::Allow(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Anything that can answer "is there a token?" without touching the network.
pub trait AuthState {
    fn is_authenticated(&self) -> bool;
}

/// Evaluate the guard synchronously before a navigation.
pub fn guard(route: Route, auth: &impl AuthState) -> GuardDecision {
    if !route.is_protected() || auth.is_authenticated() {
        GuardDecision::Allow(route)
    } else {
        tracing::debug!(route = %route, "navigation blocked, redirecting to login");
        GuardDecision::Redirect(Route::Login)
    }
}
