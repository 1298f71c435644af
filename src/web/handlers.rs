//! Web shell handlers

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header::SET_COOKIE, request::Parts, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::pages::LoginForm;
use super::server::SharedState;
use crate::auth::{
    create_tab_token, tab_cookie, tab_id_from_headers, Authenticator, LoginRequest, SessionInfo,
};
use crate::error::{Error, Result};
use crate::routes::{dashboard_path, guard, normalize_path, RouteDecision, LOGIN_PATH};

const INVALID_CREDENTIALS: &str = "Invalid credentials. Please check your email and password.";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::err(self.to_string())),
        )
            .into_response()
    }
}

/// The caller's tab, opened on first contact
pub struct CurrentTab {
    pub authenticator: Arc<Authenticator>,
    new_cookie: Option<String>,
}

impl CurrentTab {
    /// Attach the tab cookie when this request opened the tab
    fn respond(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if let Some(cookie) = &self.new_cookie {
            match HeaderValue::from_str(cookie) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!("Could not encode tab cookie: {}", e),
            }
        }
        response
    }
}

impl FromRequestParts<SharedState> for CurrentTab {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let secret = &state.config.auth.token_secret;
        let tab_id = tab_id_from_headers(&parts.headers, secret);
        let (id, authenticator, created) = state.tabs.get_or_open(tab_id.as_deref()).await;

        let new_cookie = if created {
            authenticator.hydrate();
            Some(tab_cookie(&create_tab_token(&id, secret)?))
        } else {
            None
        };

        Ok(Self {
            authenticator,
            new_cookie,
        })
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Session API

pub async fn current_session(tab: CurrentTab) -> Response {
    let session = tab.authenticator.current_session().map(SessionInfo::from);
    tab.respond(Json(ApiResponse::ok(session)))
}

// Login / logout

pub async fn login_page(State(state): State<SharedState>, tab: CurrentTab) -> Result<Response> {
    let session = tab.authenticator.current_session();
    if let RouteDecision::Redirect(to) = guard(session.as_ref(), LOGIN_PATH) {
        return Ok(tab.respond(Redirect::to(to)));
    }

    let remembered = tab.authenticator.remembered_email();
    let html = state.pages.login(
        &state.directory,
        &LoginForm {
            email: remembered.as_deref(),
            remember: remembered.is_some(),
            error: None,
            demo_password: &state.config.auth.demo_password,
        },
    )?;
    Ok(tab.respond(Html(html)))
}

pub async fn login_submit(
    State(state): State<SharedState>,
    tab: CurrentTab,
    Form(req): Form<LoginRequest>,
) -> Result<Response> {
    let auth = &tab.authenticator;

    if !auth.login(&req.email, &req.password).await {
        let html = state.pages.login(
            &state.directory,
            &LoginForm {
                email: Some(req.email.trim()),
                remember: req.wants_remember(),
                error: Some(INVALID_CREDENTIALS),
                demo_password: &state.config.auth.demo_password,
            },
        )?;
        return Ok(tab.respond((StatusCode::UNAUTHORIZED, Html(html))));
    }

    if req.wants_remember() {
        auth.remember_email(&req.email)?;
    } else {
        auth.forget_email()?;
    }

    let to = match auth.current_session() {
        Some(session) => dashboard_path(session.role),
        None => LOGIN_PATH,
    };
    Ok(tab.respond(Redirect::to(to)))
}

pub async fn logout(tab: CurrentTab) -> Response {
    tab.authenticator.logout().await;
    tab.respond(Redirect::to(LOGIN_PATH))
}

// Dashboards

pub async fn dashboard(
    State(state): State<SharedState>,
    tab: CurrentTab,
    Path(role): Path<String>,
) -> Result<Response> {
    let session = tab.authenticator.current_session();
    let path = format!("/{}/dashboard", role);

    match (guard(session.as_ref(), &path), session) {
        (RouteDecision::Allow, Some(session)) => {
            let preferences = tab.authenticator.preferences();
            let html = state.pages.dashboard(&session, &preferences)?;
            Ok(tab.respond(Html(html)))
        }
        (RouteDecision::Redirect(to), _) => Ok(tab.respond(Redirect::to(to))),
        (RouteDecision::Allow, None) => Ok(tab.respond(Redirect::to(LOGIN_PATH))),
    }
}

/// Everything else: send the caller where the guard says
pub async fn fallback(tab: CurrentTab, uri: Uri) -> Response {
    let session = tab.authenticator.current_session();
    match guard(session.as_ref(), uri.path()) {
        RouteDecision::Redirect(to) => tab.respond(Redirect::to(to)),
        RouteDecision::Allow => {
            let canonical = normalize_path(uri.path());
            if canonical != uri.path() {
                return tab.respond(Redirect::to(canonical));
            }
            tab.respond((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::err("Not found")),
            ))
        }
    }
}
