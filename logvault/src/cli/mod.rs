//! CLI module for logvault
//!
//! Provides the command-line interface for the log server.

/// serve サブコマンド
pub mod serve;

use clap::{Parser, Subcommand};

/// logvault - HTTP access to a directory of log files, gated by API keys
#[derive(Parser, Debug)]
#[command(name = "logvault")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    LOGVAULT_HOST                  Bind address (default: 0.0.0.0)
    LOGVAULT_PORT                  Listen port (default: 8000)
    LOGVAULT_LOG_LEVEL             Log level (default: info)
    LOGVAULT_DATA_DIR              Data directory (default: ~/.logvault)
    LOGVAULT_STORAGE_DIR           Directory of served .log files (default: <data>/logs)
    LOGVAULT_AUDIT_LOG_PATH        Audit log file (default: <data>/api_calls/api_calls.log)
    LOGVAULT_AUDIT_MAX_BYTES       Audit log rotation threshold (default: 10485760)
    LOGVAULT_AUDIT_FAILURE_POLICY  fatal | best_effort (default: fatal)
    LOGVAULT_DATABASE_URL          API key store (default: sqlite:<data>/logvault.db)
    LOGVAULT_AUTH_ROUTES           Routes requiring userKey: list,read,download | all | none
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the log server
    Serve(serve::ServeArgs),
}
