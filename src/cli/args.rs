//! Command-line arguments shared by the CLI tools.

use crate::Version;
use crate::client::resolve_target;
use clap::{Args, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

/// SNMP version selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnmpVersion {
    #[value(name = "1")]
    V1,
    #[value(name = "2c")]
    V2c,
}

impl From<SnmpVersion> for Version {
    fn from(v: SnmpVersion) -> Self {
        match v {
            SnmpVersion::V1 => Version::V1,
            SnmpVersion::V2c => Version::V2c,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Connection and request options.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Agent address (host, host:port); port defaults to 161.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Community string.
    #[arg(short = 'c', long, env = "SNMP_COMMUNITY", default_value = "public")]
    pub community: String,

    /// SNMP version.
    #[arg(short = 'v', long = "snmp-version", value_enum, default_value = "2c")]
    pub snmp_version: SnmpVersion,

    /// Timeout per attempt in seconds.
    #[arg(short = 't', long, value_name = "SECS", default_value = "5", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Retries after a timeout.
    #[arg(short = 'r', long, default_value_t = 0)]
    pub retries: u32,

    /// Send an exact-match GetRequest (0xA0) instead of GetNext (0xA1).
    #[arg(long)]
    pub exact: bool,
}

impl CommonArgs {
    pub fn target_addr(&self) -> Result<SocketAddr, String> {
        resolve_target(&self.target).map_err(|e| format!("invalid target '{}': {}", self.target, e))
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }
}

/// Longest accepted `--timeout`, in seconds.
const MAX_TIMEOUT_SECS: f64 = 86_400.0;

/// Parse a timeout in (possibly fractional) seconds.
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("invalid timeout '{}': expected seconds", s))?;
    if !(0.0..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(format!(
            "invalid timeout '{}': must be between 0 and {} seconds",
            s, MAX_TIMEOUT_SECS
        ));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout '{}': {}", s, e))
}

/// Output options.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(short = 'O', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Show request and response details on stderr.
    #[arg(long)]
    pub verbose: bool,

    /// Print every value as hex.
    #[arg(long)]
    pub hex: bool,

    /// Do not show well-known OID names.
    #[arg(long)]
    pub no_hints: bool,
}

impl OutputArgs {
    /// Initialize tracing; `RUST_LOG` wins, `--verbose` defaults to debug.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let default = if self.verbose {
            "snmp_codec=debug"
        } else {
            "snmp_codec=warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
