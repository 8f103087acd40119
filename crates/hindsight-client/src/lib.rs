//! # Hindsight Client
//!
//! Thin HTTP wrappers over the decision tracker REST backend.
//!
//! Provides the persistent session storage (token + cached user), the
//! [`AuthClient`] and [`DecisionClient`], and the [`AuthApi`] / [`DecisionApi`]
//! seams that view models are written against.

pub mod api;
pub mod auth;
pub mod config;
pub mod decisions;
pub mod error;
pub mod storage;

mod http;

pub use api::{AuthApi, DecisionApi};
pub use auth::AuthClient;
pub use config::ClientConfig;
pub use decisions::DecisionClient;
pub use error::{ClientError, ClientResult};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
