//! CLI interface for MedLearn

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "medlearn")]
#[command(version)]
#[command(about = "Role-based demo learning platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default medlearn.toml in the current directory
    Init,

    /// Start the web shell
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Sign in with a demo account
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long, env = "MEDLEARN_EMAIL")]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(short, long, env = "MEDLEARN_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Remember this email for the next login
        #[arg(short, long)]
        remember: bool,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the current session
    Whoami {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the demo accounts
    Accounts,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
