//! Authentication and session management

pub mod authenticator;
pub mod directory;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod tabs;

pub use authenticator::{AuthSettings, Authenticator};
pub use directory::{AccountDirectory, DemoDirectory};
pub use jwt::{create_tab_token, validate_tab_token, TabClaims};
pub use middleware::{tab_cookie, tab_id_from_headers, TAB_COOKIE};
pub use models::{
    AccountProfile, AuthState, LoginRequest, Preferences, RememberedLogin, Role, Session,
    SessionInfo,
};
pub use tabs::TabRegistry;
