//! Runtime configuration for the `vecsearch` binary.
//!
//! Every setting is a command-line flag with an environment variable
//! fallback, so the server can be configured without touching its arguments.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_BIND: &str = "0.0.0.0:7878";
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "vecsearch", version, about = "Exhaustive cosine-similarity vector search")]
pub struct Config {
    #[command(subcommand)]
    pub mode: Option<Mode>,

    /// Number of results returned by `search` when `--k-top` is not given
    #[arg(long, global = true, env = "VECSEARCH_TOP_K", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Log filter, in `tracing_subscriber::EnvFilter` syntax
    #[arg(long, global = true, env = "VECSEARCH_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Interactive shell over an in-memory store (default)
    Repl,
    /// Run the King/Queen/Apple example and print the ranking
    Demo,
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "VECSEARCH_BIND", default_value = DEFAULT_BIND)]
        bind: String,
    },
}

impl Config {
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Repl)
    }
}

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr so REPL and demo output on stdout stay clean. An
/// unparsable filter falls back to [`DEFAULT_LOG_FILTER`]. Calling this more
/// than once is harmless.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults_to_repl() {
        let config = Config::try_parse_from(["vecsearch"]).unwrap();
        assert_eq!(config.mode(), Mode::Repl);
    }

    #[test]
    fn test_serve_with_bind() {
        let config = Config::try_parse_from(["vecsearch", "serve", "--bind", "127.0.0.1:9000"]).unwrap();
        assert_eq!(config.mode(), Mode::Serve { bind: "127.0.0.1:9000".to_string() });
    }

    #[test]
    fn test_global_top_k_after_subcommand() {
        let config = Config::try_parse_from(["vecsearch", "repl", "--top-k", "3"]).unwrap();
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn test_negative_top_k_rejected() {
        assert!(Config::try_parse_from(["vecsearch", "--top-k", "-1"]).is_err());
    }

    #[test]
    fn test_init_logging_installs_subscriber() {
        // A bad filter falls back to the default, a second call is a no-op
        init_logging("not a [valid filter");
        init_logging("debug");

        assert!(tracing::dispatcher::has_been_set());
    }
}
