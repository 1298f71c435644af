//! HTML pages rendered from embedded minijinja templates

use minijinja::{context, Environment};
use rust_embed::RustEmbed;

use crate::auth::{DemoDirectory, Preferences, Session};
use crate::error::{Error, Result};
use crate::routes::nav_items;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

/// What the sign-in form shows besides the account table
#[derive(Debug, Default)]
pub struct LoginForm<'a> {
    pub email: Option<&'a str>,
    pub remember: bool,
    pub error: Option<&'a str>,
    pub demo_password: &'a str,
}

pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    /// Register every embedded template
    pub fn load() -> Result<Self> {
        let mut env = Environment::new();

        for name in Templates::iter() {
            let file = Templates::get(&name)
                .ok_or_else(|| Error::Other(format!("Embedded template {} vanished", name)))?;
            let source = String::from_utf8(file.data.into_owned())
                .map_err(|e| Error::Other(format!("Template {} is not UTF-8: {}", name, e)))?;
            env.add_template_owned(name.to_string(), source)?;
        }

        Ok(Self { env })
    }

    pub fn login(&self, directory: &DemoDirectory, form: &LoginForm<'_>) -> Result<String> {
        let accounts: Vec<_> = directory
            .accounts()
            .into_iter()
            .map(|a| context! { email => a.email.clone(), role => a.role.as_str() })
            .collect();

        let html = self.env.get_template("login.html")?.render(context! {
            email => form.email,
            remember => form.remember,
            error => form.error,
            demo_password => form.demo_password,
            accounts => accounts,
        })?;
        Ok(html)
    }

    pub fn dashboard(&self, session: &Session, preferences: &Preferences) -> Result<String> {
        let html = self.env.get_template("dashboard.html")?.render(context! {
            session => session,
            initials => session.initials(),
            role => session.role.as_str(),
            nav => nav_items(session.role),
            preferences => preferences,
            theme => preferences.theme.as_str(),
        })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AccountProfile, Role};

    #[test]
    fn test_login_page_lists_demo_accounts() {
        let pages = Pages::load().unwrap();
        let form = LoginForm {
            email: Some("student@medlearn.edu"),
            remember: true,
            demo_password: "password",
            ..Default::default()
        };
        let html = pages.login(&DemoDirectory::default(), &form).unwrap();
        assert!(html.contains("value=\"student@medlearn.edu\""));
        assert!(html.contains("admin@medlearn.edu (admin)"));
        assert!(html.contains("checked"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_login_page_shows_error() {
        let pages = Pages::load().unwrap();
        let form = LoginForm {
            error: Some("Invalid credentials"),
            demo_password: "password",
            ..Default::default()
        };
        let html = pages.login(&DemoDirectory::default(), &form).unwrap();
        assert!(html.contains("Invalid credentials"));
    }

    #[test]
    fn test_login_page_shows_configured_password() {
        let pages = Pages::load().unwrap();
        let form = LoginForm {
            demo_password: "s3cret-demo",
            ..Default::default()
        };
        let html = pages.login(&DemoDirectory::default(), &form).unwrap();
        assert!(html.contains("(password: s3cret-demo)"));
        assert!(!html.contains("(password: password)"));
    }

    #[test]
    fn test_typed_email_does_not_tick_remember() {
        let pages = Pages::load().unwrap();
        let form = LoginForm {
            email: Some("student@medlearn.edu"),
            remember: false,
            error: Some("Invalid credentials"),
            demo_password: "password",
        };
        let html = pages.login(&DemoDirectory::default(), &form).unwrap();
        assert!(html.contains("value=\"student@medlearn.edu\""));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_dashboard_escapes_and_lists_nav() {
        let pages = Pages::load().unwrap();
        let session = Session::new(
            "admin@medlearn.edu".to_string(),
            AccountProfile {
                name: "<Jordan>".to_string(),
                role: Role::Admin,
                avatar: None,
            },
        );
        let html = pages.dashboard(&session, &Preferences::default()).unwrap();
        assert!(html.contains("&lt;Jordan&gt;"));
        assert!(html.contains("/admin/users"));
    }
}
