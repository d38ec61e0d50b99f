use clap::{Parser, ValueEnum};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use pulse::db::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Production,
    Development,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Pulse - fitness catalog and training log API", long_about = None)]
pub struct Config {
    /// SQLite database path or URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "PULSE_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    #[arg(long, env = "PULSE_ENV", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    /// Register development-only endpoints (ignored in production)
    #[arg(long, env = "PULSE_DEV_ENDPOINTS")]
    pub dev_endpoints: bool,

    /// Directory holding the built frontend, served for non-API paths
    #[arg(long, env = "PULSE_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Database connections to keep (defaults to one per CPU)
    #[arg(long, env = "PULSE_POOL_SIZE")]
    pub pool_size: Option<u32>,

    /// Runtime worker threads (defaults to available parallelism)
    #[arg(long, env = "PULSE_WORKERS")]
    pub workers: Option<usize>,

    /// off | error | warn | info | debug | trace
    #[arg(long, env = "PULSE_LOG", default_value = "info")]
    pub log_level: String,
}

/// The part of the configuration handlers need at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub environment: Environment,
    pub dev_endpoints: bool,
}

impl Settings {
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            dev_endpoints: false,
        }
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            dev_endpoints: true,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Dev endpoints need both the flag and a development environment.
    pub fn dev_endpoints_enabled(&self) -> bool {
        self.dev_endpoints && self.is_development()
    }
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            environment: self.environment,
            dev_endpoints: self.dev_endpoints,
        }
    }
}
