//! Server settings, from command-line flags or `RESIDENCY_*` environment
//! variables.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "residency-backend", about = "Residency training management server")]
pub struct Config {
    #[arg(long, env = "RESIDENCY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "RESIDENCY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file.
    #[arg(long, env = "RESIDENCY_DATABASE", default_value = "residency.sqlite")]
    pub database: PathBuf,

    /// Directory under which each feature keeps its uploaded files.
    #[arg(long, env = "RESIDENCY_UPLOAD_ROOT", default_value = "uploads")]
    pub upload_root: PathBuf,

    /// Largest accepted JSON body, in megabytes.
    #[arg(long, env = "RESIDENCY_JSON_LIMIT_MB", default_value_t = 10)]
    pub json_limit_mb: usize,

    /// Open the UI in the default browser once the server is up.
    #[arg(long, env = "RESIDENCY_OPEN_BROWSER")]
    pub open_browser: bool,
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn json_limit(&self) -> usize {
        self.json_limit_mb * 1024 * 1024
    }
}
