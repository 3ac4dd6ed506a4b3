//! Configuration for LineKV
//!
//! Command-line options for the `linekv` binary.

use crate::storage::DEFAULT_SHARDS;
use crate::{DEFAULT_HOST, DEFAULT_PORT};
use clap::{Parser, Subcommand};

/// LineKV - an in-memory key-value store with a line protocol
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "linekv", version)]
#[command(about = "In-memory key-value store with a line-oriented command protocol")]
pub struct Cli {
    /// Log filter (e.g. "info", "linekv=debug"); RUST_LOG takes precedence.
    /// Defaults to "warn" for the terminal session and "info" when serving.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Number of storage shards
    #[arg(long, global = true, default_value_t = DEFAULT_SHARDS)]
    pub shards: usize,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// How the binary runs
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Interactive session on the terminal (default)
    Repl,

    /// Serve the line protocol over TCP
    Serve {
        /// Host to bind to
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

impl Cli {
    /// The selected mode, defaulting to the interactive session.
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Repl)
    }

    /// The log filter to install when RUST_LOG is unset.
    pub fn log_filter(&self) -> &str {
        match (&self.log_level, self.mode()) {
            (Some(level), _) => level.as_str(),
            (None, Mode::Repl) => "warn",
            (None, Mode::Serve { .. }) => "info",
        }
    }
}

impl Mode {
    /// Returns the bind address, if this mode listens on one.
    pub fn bind_address(&self) -> Option<String> {
        match self {
            Mode::Repl => None,
            Mode::Serve { host, port } => Some(format!("{}:{}", host, port)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_repl() {
        let cli = Cli::try_parse_from(["linekv"]).unwrap();
        assert_eq!(cli.mode(), Mode::Repl);
        assert_eq!(cli.shards, DEFAULT_SHARDS);
        assert_eq!(cli.log_filter(), "warn");
        assert_eq!(cli.mode().bind_address(), None);
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["linekv", "serve"]).unwrap();
        assert_eq!(
            cli.mode().bind_address(),
            Some(format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT))
        );
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn test_explicit_log_level() {
        let cli = Cli::try_parse_from(["linekv", "--log-level", "debug", "serve"]).unwrap();
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_serve_options() {
        let cli = Cli::try_parse_from([
            "linekv", "serve", "--host", "0.0.0.0", "-p", "9000", "--shards", "8",
        ])
        .unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Serve {
                host: "0.0.0.0".to_string(),
                port: 9000
            }
        );
        assert_eq!(cli.shards, 8);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["linekv", "serve", "--port", "not-a-port"]).is_err());
        assert!(Cli::try_parse_from(["linekv", "serve", "--port", "70000"]).is_err());
    }
}
