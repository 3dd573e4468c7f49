// SPDX-License-Identifier: MIT

//! Server configuration
//!
//! Every setting can come from a flag or an environment variable (a `.env`
//! file is honoured by the binary):
//!
//! | Flag           | Env Var               | Default     |
//! |----------------|-----------------------|-------------|
//! | `--host`       | `DECISION_HOST`       | `127.0.0.1` |
//! | `--port`       | `DECISION_PORT`       | `3000`      |
//! | `--tables-dir` | `DECISION_TABLES_DIR` | `tables`    |

use clap::Args;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::error::DecisionError;

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "DECISION_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "DECISION_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory of rule tables to serve
    #[arg(long, env = "DECISION_TABLES_DIR", default_value = "tables")]
    pub tables_dir: PathBuf,
}

impl ServerConfig {
    /// Bind a listener on host and port; the host may be a name such as `localhost`
    pub async fn bind(&self) -> Result<TcpListener, DecisionError> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                DecisionError::config(format!(
                    "Cannot bind {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            tables_dir: PathBuf::from("tables"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        config: ServerConfig,
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["decision", "--port", "8080", "--tables-dir", "rules"]);
        assert_eq!(cli.config.port, 8080);
        assert_eq!(cli.config.tables_dir, PathBuf::from("rules"));
    }

    #[tokio::test]
    async fn test_bind_accepts_hostname() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
            ..ServerConfig::default()
        };
        let listener = config.bind().await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_reports_bad_host() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 0,
            ..ServerConfig::default()
        };
        let err = config.bind().await.unwrap_err();
        assert!(matches!(err, DecisionError::Config(_)));
        assert!(err.to_string().contains("not a host"));
    }
}
