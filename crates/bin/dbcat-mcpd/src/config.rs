use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_FAN_OUT_CAP: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "dbcat-mcpd", version, about = "Dbcat MCP daemon.")]
struct CliArgs {
    /// SQLite file holding the catalog mirror (all_tables, all_views, ...).
    #[arg(long, env = "DBCAT_CATALOG_DB")]
    catalog_db: PathBuf,

    /// Directory for per-kind metadata snapshots. Defaults to the
    /// daemon's own directory.
    #[arg(long, env = "DBCAT_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Schema owner used to scope catalog queries. Unset means unscoped.
    #[arg(long, env = "DBCAT_SCHEMA_OWNER")]
    schema_owner: Option<String>,

    #[arg(
        long,
        env = "DBCAT_FAN_OUT_CAP",
        default_value_t = DEFAULT_FAN_OUT_CAP
    )]
    fan_out_cap: usize,

    #[arg(
        long = "stdio",
        env = "DBCAT_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "DBCAT_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct DbcatConfig {
    pub catalog_db: PathBuf,
    pub cache_dir: PathBuf,
    pub schema_owner: Option<String>,
    pub fan_out_cap: usize,
    pub enable_stdio: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl DbcatConfig {
    /// Parses configuration from CLI arguments and the environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if a setting is missing or invalid.
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for DbcatConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.catalog_db.as_os_str().is_empty() {
            return Err(ConfigError::MissingSetting("DBCAT_CATALOG_DB"));
        }

        if args.fan_out_cap == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "DBCAT_FAN_OUT_CAP",
                value: args.fan_out_cap.to_string(),
            });
        }

        let schema_owner = args
            .schema_owner
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let cache_dir = match args.cache_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => default_cache_dir(),
        };

        Ok(Self {
            catalog_db: args.catalog_db,
            cache_dir,
            schema_owner,
            fan_out_cap: args.fan_out_cap,
            enable_stdio: args.enable_stdio,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}

/// The daemon's own directory, falling back to the working directory
/// when the executable path cannot be resolved.
fn default_cache_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            catalog_db: PathBuf::from("catalog.db"),
            cache_dir: None,
            schema_owner: None,
            fan_out_cap: DEFAULT_FAN_OUT_CAP,
            enable_stdio: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
        }
    }

    #[test]
    fn blank_schema_owner_means_unscoped() {
        let mut args = base_args();
        args.schema_owner = Some("   ".to_string());

        let config = DbcatConfig::try_from(args).expect("config should parse");
        assert!(config.schema_owner.is_none());
    }

    #[test]
    fn cache_dir_falls_back_to_the_daemon_directory() {
        let config = DbcatConfig::try_from(base_args()).expect("config should parse");
        assert!(!config.cache_dir.as_os_str().is_empty());
    }

    #[test]
    fn zero_fan_out_cap_is_rejected() {
        let mut args = base_args();
        args.fan_out_cap = 0;
        assert!(DbcatConfig::try_from(args).is_err());
    }
}
