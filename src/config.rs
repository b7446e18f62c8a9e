//! Constants and runtime configuration

use clap::ValueEnum;

/// Prefix of canonical identifier names produced by normalization (`var1`, `var2`, ...)
pub const CANONICAL_NAME_PREFIX: &str = "var";

/// Scope label recorded on every symbol; there is only one scope.
pub const GLOBAL_SCOPE: &str = "global";

/// Upper bound of the similarity score
pub const MAX_SIMILARITY: f64 = 100.0;

/// Deepest nesting of blocks and operators the parser accepts
pub const MAX_NESTING_DEPTH: usize = 256;

/// Log filter used when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    #[default]
    Text,
    /// One JSON document on stdout
    Json,
}

/// Settings shared by all commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: OutputFormat,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Resolve the log filter. `RUST_LOG` wins over the configured level.
    pub fn effective_log_filter(&self) -> String {
        std::env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.log_filter.clone())
    }

    /// Install a stderr `fmt` subscriber honouring the resolved filter.
    ///
    /// Calling this twice is harmless; the second install is ignored.
    pub fn init_logging(&self) {
        let filter = tracing_subscriber::EnvFilter::try_new(self.effective_log_filter())
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
