//! User accounts and authentication payloads.

pub mod model;

pub use model::{AuthResponse, Credentials, Registration, User};
