//! Route surface and guards
//!
//! Pure decisions only; the web shell turns them into responses.

use serde::Serialize;

use crate::auth::{Role, Session};

pub const LOGIN_PATH: &str = "/login";

/// Dashboard entry point for a role
pub fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/dashboard",
        Role::Instructor => "/instructor/dashboard",
        Role::Admin => "/admin/dashboard",
    }
}

/// Role whose dashboard lives at `path`
pub fn dashboard_role(path: &str) -> Option<Role> {
    Role::ALL.into_iter().find(|role| dashboard_path(*role) == path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide whether `session` may view `path`
/// Strip trailing slashes so `/login/` and `/login` name the same route
pub fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

pub fn guard(session: Option<&Session>, path: &str) -> RouteDecision {
    let path = normalize_path(path);

    match (session, path) {
        (None, LOGIN_PATH) => RouteDecision::Allow,
        (Some(s), LOGIN_PATH) => RouteDecision::Redirect(dashboard_path(s.role)),
        (None, _) => RouteDecision::Redirect(LOGIN_PATH),
        (Some(s), _) => match dashboard_role(path) {
            Some(role) if role == s.role => RouteDecision::Allow,
            _ => RouteDecision::Redirect(dashboard_path(s.role)),
        },
    }
}

/// Sidebar link
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

const STUDENT_NAV: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/student/dashboard" },
    NavItem { label: "My Courses", href: "/student/courses" },
    NavItem { label: "AI Assistant", href: "/student/assistant" },
    NavItem { label: "Settings", href: "/student/settings" },
];

const INSTRUCTOR_NAV: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/instructor/dashboard" },
    NavItem { label: "Courses", href: "/instructor/courses" },
    NavItem { label: "Students", href: "/instructor/students" },
    NavItem { label: "Settings", href: "/instructor/settings" },
];

const ADMIN_NAV: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/admin/dashboard" },
    NavItem { label: "Users", href: "/admin/users" },
    NavItem { label: "Courses", href: "/admin/courses" },
    NavItem { label: "Settings", href: "/admin/settings" },
];

pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Student => STUDENT_NAV,
        Role::Instructor => INSTRUCTOR_NAV,
        Role::Admin => ADMIN_NAV,
    }
}
