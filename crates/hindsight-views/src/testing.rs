//! In-memory doubles for the client seams.

use std::sync::Mutex;

use async_trait::async_trait;
use hindsight_client::{AuthApi, ClientError, ClientResult, DecisionApi};
use hindsight_core::auth::{AuthResponse, Credentials, Registration, User};
use hindsight_core::decision::model::{
    Acknowledgement, AiAnalysis, Decision, NewDecision, OutcomeUpdate,
};

pub fn user(name: &str) -> User {
    User {
        id: Some(format!("id-{name}")),
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: None,
    }
}

pub fn decision(id: &str, outcome: Option<&str>) -> Decision {
    Decision {
        id: Some(id.to_string()),
        user_id: Some("id-ada".to_string()),
        title: format!("Decision {id}"),
        context: "ctx".to_string(),
        reasoning: "because".to_string(),
        assumptions: vec!["a1".to_string()],
        expected_outcome: "good things".to_string(),
        actual_outcome: outcome.map(str::to_string),
        success_level: None,
        unexpected_factors: None,
        ai_analysis: None,
        created_at: None,
        updated_at: None,
    }
}

/// Accepts `ada@example.com` / `secret123`.
#[derive(Default)]
pub struct FakeAuth {
    pub token: Mutex<Option<String>>,
    pub user: Mutex<Option<User>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<ClientError>>,
}

impl FakeAuth {
    pub fn signed_in() -> Self {
        let fake = Self::default();
        *fake.token.lock().unwrap() = Some("tok".to_string());
        *fake.user.lock().unwrap() = Some(user("ada"));
        fake
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        self.calls.lock().unwrap().push("register".to_string());
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        Ok(AuthResponse {
            token: "fresh".to_string(),
            user: user(&registration.username),
            message: "User registered successfully".to_string(),
        })
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        self.calls.lock().unwrap().push("login".to_string());
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        if credentials.email != "ada@example.com" || credentials.password != "secret123" {
            return Err(ClientError::from_response(401, r#"{"message":"Invalid credentials"}"#));
        }
        *self.token.lock().unwrap() = Some("tok".to_string());
        *self.user.lock().unwrap() = Some(user("ada"));
        Ok(AuthResponse {
            token: "tok".to_string(),
            user: user("ada"),
            message: "Login successful".to_string(),
        })
    }

    fn logout(&self) -> ClientResult<()> {
        *self.token.lock().unwrap() = None;
        *self.user.lock().unwrap() = None;
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }

    fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap().clone()
    }
}

/// Stores decisions in a vector; analysis lands on the next `get`.
#[derive(Default)]
pub struct FakeDecisions {
    pub decisions: Mutex<Vec<Decision>>,
    pub pending_analysis: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<ClientError>>,
}

impl FakeDecisions {
    pub fn with(decisions: Vec<Decision>) -> Self {
        let fake = Self::default();
        *fake.decisions.lock().unwrap() = decisions;
        fake
    }

    pub fn failing(err: ClientError) -> Self {
        let fake = Self::default();
        *fake.fail_with.lock().unwrap() = Some(err);
        fake
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_with.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found() -> ClientError {
        ClientError::from_response(404, r#"{"message":"Decision not found"}"#)
    }
}

#[async_trait]
impl DecisionApi for FakeDecisions {
    async fn create(&self, new: &NewDecision) -> ClientResult<Decision> {
        self.record("create")?;
        let mut decisions = self.decisions.lock().unwrap();
        let mut created = decision(&format!("d{}", decisions.len() + 1), None);
        created.title = new.title.clone();
        created.context = new.context.clone();
        created.reasoning = new.reasoning.clone();
        created.assumptions = new.assumptions.clone();
        created.expected_outcome = new.expected_outcome.clone();
        decisions.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> ClientResult<Vec<Decision>> {
        self.record("list")?;
        Ok(self.decisions.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> ClientResult<Decision> {
        self.record("get")?;
        let pending = std::mem::take(&mut *self.pending_analysis.lock().unwrap());
        let mut decisions = self.decisions.lock().unwrap();
        for d in decisions.iter_mut() {
            if d.id.as_ref().is_some_and(|i| pending.contains(i)) {
                d.ai_analysis = Some(AiAnalysis {
                    comparison: "matched".to_string(),
                    ..AiAnalysis::default()
                });
            }
        }
        decisions
            .iter()
            .find(|d| d.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn update_outcome(&self, id: &str, outcome: &OutcomeUpdate) -> ClientResult<Decision> {
        self.record("update_outcome")?;
        let mut decisions = self.decisions.lock().unwrap();
        let d = decisions
            .iter_mut()
            .find(|d| d.id.as_deref() == Some(id))
            .ok_or_else(Self::not_found)?;
        d.actual_outcome = Some(outcome.actual_outcome.clone());
        d.success_level = outcome.success_level.map(u8::from);
        d.unexpected_factors = Some(outcome.unexpected_factors.clone());
        Ok(d.clone())
    }

    async fn delete(&self, id: &str) -> ClientResult<Acknowledgement> {
        self.record("delete")?;
        self.decisions
            .lock()
            .unwrap()
            .retain(|d| d.id.as_deref() != Some(id));
        Ok(Acknowledgement {
            message: Some("Decision deleted".to_string()),
        })
    }

    async fn analyze(&self, id: &str) -> ClientResult<Acknowledgement> {
        self.record("analyze")?;
        self.pending_analysis.lock().unwrap().push(id.to_string());
        Ok(Acknowledgement {
            message: Some("Analysis started".to_string()),
        })
    }
}
