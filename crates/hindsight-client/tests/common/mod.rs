//! In-process fake of the decision tracker REST backend.
//!
//! Implements just enough of `/api/users` and `/api/decisions` to exercise the
//! clients over real HTTP. Analysis completes lazily: a trigger marks the
//! decision and the analysis is attached on the next read.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use hindsight_client::{
    AuthClient, ClientConfig, ClientError, ClientResult, DecisionClient, KeyValueStore,
    MemoryStore,
};
use hindsight_core::auth::{Credentials, Registration, User};
use hindsight_core::decision::model::{AiAnalysis, Decision, NewDecision, OutcomeUpdate};

#[derive(Default)]
pub struct Backend {
    users: HashMap<String, (User, String)>,
    tokens: HashMap<String, String>,
    decisions: Vec<Decision>,
    pending_analysis: Vec<String>,
    pub auth_headers: Vec<Option<String>>,
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct TestServer {
    pub api_url: String,
    pub backend: Shared,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend: Shared = Arc::new(Mutex::new(Backend::default()));
        let app = router(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        Self {
            api_url: format!("http://{addr}/api"),
            backend,
        }
    }

    /// Clients wired to this server with an in-memory session store.
    pub fn clients(&self) -> (AuthClient, DecisionClient, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let (auth, decisions) = self.clients_with(storage.clone());
        (auth, decisions, storage)
    }

    /// Clients wired to this server over the given session store.
    pub fn clients_with(&self, storage: Arc<dyn KeyValueStore>) -> (AuthClient, DecisionClient) {
        let config = ClientConfig::new(&self.api_url, "/tmp/hindsight-test-unused");
        let auth = AuthClient::new(&config, storage).expect("auth client");
        let decisions = DecisionClient::new(&config, auth.clone()).expect("decision client");
        (auth, decisions)
    }

    pub fn last_auth_header(&self) -> Option<String> {
        self.backend
            .lock()
            .unwrap()
            .auth_headers
            .last()
            .cloned()
            .flatten()
    }
}

/// Register and log in a fresh account; returns the user.
pub async fn signed_in(auth: &AuthClient, name: &str) -> User {
    let email = format!("{name}@example.com");
    auth.register(&Registration {
        username: name.to_string(),
        email: email.clone(),
        password: "secret123".to_string(),
    })
    .await
    .expect("register");
    auth.login(&Credentials {
        email,
        password: "secret123".to_string(),
    })
    .await
    .expect("login")
    .user
}

/// Memory store whose writes to one key always fail.
pub struct FailingStore {
    pub inner: MemoryStore,
    pub failing_key: &'static str,
}

impl FailingStore {
    pub fn failing_on(key: &'static str) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_key: key,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        if key == self.failing_key {
            return Err(ClientError::storage(format!("disk full writing {key}")));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.inner.remove_item(key)
    }
}

pub fn new_decision(title: &str) -> NewDecision {
    NewDecision {
        title: title.to_string(),
        context: "Team is growing".to_string(),
        reasoning: "Hiring unblocks the roadmap".to_string(),
        assumptions: vec!["budget holds".to_string(), "candidates exist".to_string()],
        expected_outcome: "Ship Q3 features on time".to_string(),
    }
}

fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/decisions", post(create_decision).get(list_decisions))
        .route("/decisions/{id}", get(get_decision).delete(delete_decision))
        .route("/decisions/{id}/outcome", put(update_outcome))
        .route("/decisions/{id}/analyze", post(analyze))
        .with_state(state);
    Router::new().nest("/api", api)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn authenticate(backend: &mut Backend, headers: &HeaderMap) -> Result<String, Response> {
    let header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    backend.auth_headers.push(header.clone());
    header
        .as_deref()
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(|t| backend.tokens.get(t).cloned())
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "No token, authorization denied"))
}

async fn register(State(state): State<Shared>, Json(req): Json<Registration>) -> Response {
    let mut backend = state.lock().unwrap();
    if backend.users.contains_key(&req.email) {
        return message(StatusCode::BAD_REQUEST, "User already exists");
    }
    let user = User {
        id: Some(uuid::Uuid::new_v4().to_string()),
        username: req.username,
        email: req.email.clone(),
        password: None,
    };
    let token = uuid::Uuid::new_v4().to_string();
    backend
        .tokens
        .insert(token.clone(), user.id.clone().unwrap_or_default());
    backend.users.insert(req.email, (user.clone(), req.password));
    (
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": user, "message": "User registered successfully" })),
    )
        .into_response()
}

async fn login(State(state): State<Shared>, Json(req): Json<Credentials>) -> Response {
    let mut backend = state.lock().unwrap();
    let user = match backend.users.get(&req.email) {
        Some((user, password)) if *password == req.password => user.clone(),
        _ => return message(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    let token = uuid::Uuid::new_v4().to_string();
    backend
        .tokens
        .insert(token.clone(), user.id.clone().unwrap_or_default());
    Json(json!({ "token": token, "user": user, "message": "Login successful" })).into_response()
}

async fn create_decision(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<NewDecision>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user_id = match authenticate(&mut backend, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if req.title.trim().is_empty() || req.expected_outcome.trim().is_empty() {
        return message(StatusCode::BAD_REQUEST, "Missing required fields");
    }
    let now = Utc::now();
    let decision = Decision {
        id: Some(uuid::Uuid::new_v4().to_string()),
        user_id: Some(user_id),
        title: req.title,
        context: req.context,
        reasoning: req.reasoning,
        assumptions: req.assumptions,
        expected_outcome: req.expected_outcome,
        actual_outcome: None,
        success_level: None,
        unexpected_factors: None,
        ai_analysis: None,
        created_at: Some(now),
        updated_at: Some(now),
    };
    backend.decisions.push(decision.clone());
    (StatusCode::CREATED, Json(decision)).into_response()
}

async fn list_decisions(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    let user_id = match authenticate(&mut backend, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    complete_pending(&mut backend);
    let mine: Vec<Decision> = backend
        .decisions
        .iter()
        .filter(|d| d.user_id.as_deref() == Some(user_id.as_str()))
        .cloned()
        .collect();
    Json(mine).into_response()
}

async fn get_decision(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user_id = match authenticate(&mut backend, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    complete_pending(&mut backend);
    match find(&backend, &user_id, &id) {
        Some(index) => Json(backend.decisions[index].clone()).into_response(),
        None => message(StatusCode::NOT_FOUND, "Decision not found"),
    }
}

async fn update_outcome(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<OutcomeUpdate>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user_id = match authenticate(&mut backend, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Some(index) = find(&backend, &user_id, &id) else {
        return message(StatusCode::NOT_FOUND, "Decision not found");
    };
    let decision = &mut backend.decisions[index];
    decision.actual_outcome = Some(req.actual_outcome);
    decision.success_level = req.success_level.map(u8::from);
    decision.unexpected_factors = Some(req.unexpected_factors);
    decision.updated_at = Some(Utc::now());
    Json(decision.clone()).into_response()
}

async fn delete_decision(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user_id = match authenticate(&mut backend, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Some(index) = find(&backend, &user_id, &id) else {
        return message(StatusCode::NOT_FOUND, "Decision not found");
    };
    backend.decisions.remove(index);
    message(StatusCode::OK, "Decision deleted")
}

async fn analyze(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user_id = match authenticate(&mut backend, &headers) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Some(index) = find(&backend, &user_id, &id) else {
        return message(StatusCode::NOT_FOUND, "Decision not found");
    };
    if !backend.decisions[index].has_outcome() {
        return message(StatusCode::BAD_REQUEST, "Record the actual outcome first");
    }
    backend.pending_analysis.push(id);
    message(StatusCode::ACCEPTED, "Analysis started")
}

fn find(backend: &Backend, user_id: &str, id: &str) -> Option<usize> {
    backend
        .decisions
        .iter()
        .position(|d| d.id.as_deref() == Some(id) && d.user_id.as_deref() == Some(user_id))
}

fn complete_pending(backend: &mut Backend) {
    let pending = std::mem::take(&mut backend.pending_analysis);
    for id in pending {
        if let Some(decision) = backend
            .decisions
            .iter_mut()
            .find(|d| d.id.as_deref() == Some(id.as_str()))
        {
            decision.ai_analysis = Some(AiAnalysis {
                comparison: format!(
                    "Expected '{}', got '{}'",
                    decision.expected_outcome,
                    decision.actual_outcome.clone().unwrap_or_default()
                ),
                invalid_assumptions: decision.assumptions.iter().take(1).cloned().collect(),
                lessons_learned: vec!["Validate assumptions earlier".to_string()],
                suggestions: vec!["Set a review date".to_string()],
            });
        }
    }
}
