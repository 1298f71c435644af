//! HTTP server for the web shell

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthSettings, DemoDirectory, TabRegistry};
use crate::config::Config;
use crate::error::Result;
use crate::routes::LOGIN_PATH;

use super::handlers;
use super::pages::Pages;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub directory: Arc<DemoDirectory>,
    pub tabs: TabRegistry,
    pub pages: Pages,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let directory = Arc::new(DemoDirectory::new(config.auth.accounts.clone()));
        let settings = AuthSettings::from_config(&config.auth)?;
        let tabs = TabRegistry::new(
            directory.clone(),
            settings,
            config.auth.tab_idle_minutes,
            config.auth.max_tabs,
        );
        let pages = Pages::load()?;

        Ok(Self {
            config,
            directory,
            tabs,
            pages,
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Run the web shell on host:port
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, config).await
}

/// Serve the web shell on an already bound listener
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!(
        "Loaded {} demo accounts, login delay {}ms",
        state.directory.len(),
        state.config.auth.login_delay_ms
    );

    let app = create_router(state);

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(handlers::health))
        .route("/api/session", get(handlers::current_session))
        // UI routes
        .route(LOGIN_PATH, get(handlers::login_page).post(handlers::login_submit))
        .route("/logout", post(handlers::logout))
        .route("/{role}/dashboard", get(handlers::dashboard))
        .fallback(handlers::fallback)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
