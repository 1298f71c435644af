//! Signed tab tokens
//!
//! The web shell identifies each browser by a cookie. The cookie holds a
//! JWT so a client cannot pick another tab's id.

use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Cookie lifetime (7 days); idle expiry is enforced by the registry
pub const TAB_TOKEN_TTL_SECS: i64 = 7 * 24 * 3600;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TabClaims {
    /// Subject (tab ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl TabClaims {
    pub fn new(tab_id: &str) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: tab_id.to_string(),
            iat: now,
            exp: now + TAB_TOKEN_TTL_SECS,
        }
    }
}

/// Create a signed token for a tab id
pub fn create_tab_token(tab_id: &str, secret: &str) -> Result<String> {
    let claims = TabClaims::new(tab_id);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(Error::from)
}

/// Validate and decode a tab token
pub fn validate_tab_token(token: &str, secret: &str) -> Result<TabClaims> {
    decode::<TabClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(Error::from)
}
