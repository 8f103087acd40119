//! Hindsight Core Library
//!
//! Domain models and client-side rules for the Hindsight decision tracker:
//! decision records, form validation, dashboard statistics, routes with their
//! guard, and the current-user store.

pub mod auth;
pub mod decision;
pub mod error;
pub mod forms;
pub mod routes;
pub mod session;

pub use error::{CoreError, CoreResult};
