//! CLI command implementations

use anyhow::{bail, Result};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthSettings, Authenticator, DemoDirectory};
use crate::cli::{error, info, print_account_table, print_session_detail, success, warn, OutputFormat};
use crate::config::{self, Config};
use crate::routes::{dashboard_path, LOGIN_PATH};
use crate::storage::FileStorage;

/// Initialize a new medlearn.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("medlearn.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created medlearn.toml");
    info("Run 'medlearn serve' to start the web shell or 'medlearn login' to sign in here");

    Ok(())
}

/// Start the web shell
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}{}", host, port, LOGIN_PATH));

    crate::web::run_server(config, &host, port).await?;
    Ok(())
}

/// Sign in, prompting for anything not given on the command line
pub async fn login(email: Option<String>, password: Option<String>, remember: bool) -> Result<()> {
    let config = load_config()?;
    let auth = build_authenticator(&config)?;

    if let Some(session) = auth.hydrate() {
        warn(&format!(
            "Already signed in as {} ({}); signing in again replaces the session",
            session.email, session.role
        ));
    }

    let email = match email {
        Some(email) => email,
        None => {
            let mut input = Input::<String>::new().with_prompt("Email");
            if let Some(remembered) = auth.remembered_email() {
                input = input.default(remembered);
            }
            input.interact_text()?
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message("Signing in...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let ok = auth.login(&email, &password).await;
    spinner.finish_and_clear();

    if !ok {
        error("Invalid credentials. Please check your email and password.");
        bail!("login failed for {}", email.trim());
    }

    if remember {
        auth.remember_email(&email)?;
    } else {
        auth.forget_email()?;
    }

    match auth.current_session() {
        Some(session) => {
            success(&format!("Signed in as {} ({})", session.name, session.role));
            info(&format!("Dashboard: {}", dashboard_path(session.role)));
        }
        None => warn("Signed in, but the session could not be read back"),
    }

    Ok(())
}

/// Sign out
pub async fn logout() -> Result<()> {
    let config = load_config()?;
    let auth = build_authenticator(&config)?;

    let was_signed_in = auth.is_authenticated();
    auth.logout().await;

    if was_signed_in {
        success("Signed out");
    } else {
        info("No active session");
    }
    info("Run 'medlearn login' to sign in again");

    Ok(())
}

/// Show the current session
pub async fn whoami(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let auth = build_authenticator(&config)?;

    let session = auth.hydrate();

    match format {
        OutputFormat::Table => match &session {
            Some(session) => print_session_detail(session),
            None => info("Not signed in. Run 'medlearn login' first"),
        },
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&session)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&session)?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// List the demo accounts
pub async fn accounts() -> Result<()> {
    let config = load_config()?;
    let directory = DemoDirectory::new(config.auth.accounts.clone());

    print_account_table(&directory.accounts(), &config.auth.demo_password);
    Ok(())
}

// Helper functions

fn load_config() -> Result<Config> {
    Ok(config::load_config_or_default()?)
}

/// The CLI's authenticator: the configured directory over file storage
fn build_authenticator(config: &Config) -> Result<Authenticator> {
    let storage = Arc::new(FileStorage::new(&config.storage.path));
    let directory = Arc::new(DemoDirectory::new(config.auth.accounts.clone()));
    let settings = AuthSettings::from_config(&config.auth)?;

    tracing::debug!("Using storage at {}", config.storage.path.display());
    Ok(Authenticator::new(storage, directory, settings))
}
