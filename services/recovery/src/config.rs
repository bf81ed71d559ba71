use serde::Deserialize;

use banter_core::config::Config;

/// Recovery service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct RecoveryConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Accounts service gRPC URL (e.g. "http://accounts:50051").
    pub accounts_grpc_url: String,
    /// SMTP relay host.
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// From address for reset code emails.
    pub smtp_from: String,
    /// TCP port to listen on.
    #[serde(default = "default_recovery_port")]
    pub recovery_port: u16,
}

impl Config for RecoveryConfig {}

fn default_smtp_port() -> u16 {
    587
}

fn default_recovery_port() -> u16 {
    3114
}
