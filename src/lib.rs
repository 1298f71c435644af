//! MedLearn - role-based demo learning platform
//!
//! The library holds the session authenticator and the surfaces that
//! drive it: a web shell with per-role dashboards and a CLI.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod storage;
pub mod web;

pub use auth::{Authenticator, Role, Session};
pub use config::Config;
pub use error::Error;
