//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{Role, Session};
use crate::config::AccountConfig;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Student => Color::Green,
        Role::Instructor => Color::Blue,
        Role::Admin => Color::Magenta,
    }
}

/// Format a role as a colored string
pub fn format_role(role: Role) -> String {
    match role {
        Role::Student => role.as_str().green().to_string(),
        Role::Instructor => role.as_str().blue().to_string(),
        Role::Admin => role.as_str().magenta().to_string(),
    }
}

/// Print the demo account table
pub fn print_account_table(accounts: &[&AccountConfig], demo_password: &str) {
    if accounts.is_empty() {
        warn("No demo accounts configured. Add [[auth.accounts]] entries to medlearn.toml");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Password").fg(Color::Cyan),
        ]);

    for account in accounts {
        table.add_row(vec![
            Cell::new(&account.email),
            Cell::new(&account.name),
            Cell::new(account.role.as_str()).fg(role_color(account.role)),
            Cell::new(demo_password),
        ]);
    }

    println!("{table}");
}

/// Print session details
pub fn print_session_detail(session: &Session) {
    println!("{}", "Current Session".bold().underline());
    println!();
    println!("  {} {}", "Name:".bold(), session.name);
    println!("  {} {}", "Email:".bold(), session.email);
    println!("  {} {}", "Role:".bold(), format_role(session.role));
    if let Some(avatar) = &session.avatar {
        println!("  {} {}", "Avatar:".bold(), avatar.cyan());
    }
    println!("  {} {}", "Session:".bold(), session.id);
    println!(
        "  {} {}",
        "Signed in:".bold(),
        session.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
