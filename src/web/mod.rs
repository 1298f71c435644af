//! Web shell: login page, role dashboards, and the session API

pub mod handlers;
pub mod pages;
pub mod server;

pub use server::*;
