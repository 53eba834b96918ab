use clap::Parser;

pub const DEFAULT_LISTEN: &str = "[::1]:3080";
pub const DEFAULT_DB_URI: &str = "sqlite:albiondata.db";

/// Orders older than this (seconds) are ignored unless the request sets `age`.
pub const DEFAULT_MIN_UPDATED_AT_SECS: i64 = 172_800;

pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Every setting can come from a flag or from its `ADA_*` environment
/// variable; flags win.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "albiondata-api",
    about = "Reads market data from a SQLite database and serves it through a HTTP API"
)]
pub struct Config {
    /// Host and port to listen on
    #[arg(short, long, env = "ADA_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: String,

    /// sqlx connection URL of the market database
    #[arg(short = 'u', long = "db-uri", alias = "dbURI", env = "ADA_DB_URI", default_value = DEFAULT_DB_URI)]
    pub db_uri: String,

    /// Connection pool size
    #[arg(
        long = "db-max-connections",
        env = "ADA_DB_MAX_CONNECTIONS",
        default_value_t = DEFAULT_DB_MAX_CONNECTIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub db_max_connections: u32,

    /// Default freshness window: updated_at must be >= now - this many seconds
    #[arg(
        short,
        long = "min-updated-at",
        alias = "minUpdatedAt",
        env = "ADA_MIN_UPDATED_AT",
        default_value_t = DEFAULT_MIN_UPDATED_AT_SECS,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub min_updated_at_secs: i64,

    /// tracing filter directive, e.g. "info" or "albiondata_api=debug"
    #[arg(long = "log-level", env = "ADA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::try_parse_from(["albiondata-api"]).unwrap();
        assert_eq!(cfg.listen, DEFAULT_LISTEN);
        assert_eq!(cfg.db_uri, DEFAULT_DB_URI);
        assert_eq!(cfg.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
        assert_eq!(cfg.min_updated_at_secs, 172_800);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn short_and_long_flags_are_read() {
        let cfg = Config::try_parse_from([
            "albiondata-api",
            "-l",
            "0.0.0.0:8080",
            "-u",
            "sqlite:/var/lib/ada/market.db",
            "-m",
            "600",
            "--db-max-connections",
            "12",
        ])
        .unwrap();
        assert_eq!(cfg.listen, "0.0.0.0:8080");
        assert_eq!(cfg.db_uri, "sqlite:/var/lib/ada/market.db");
        assert_eq!(cfg.min_updated_at_secs, 600);
        assert_eq!(cfg.db_max_connections, 12);
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let cfg = Config::try_parse_from([
            "albiondata-api",
            "--dbURI",
            "sqlite::memory:",
            "--minUpdatedAt",
            "60",
        ])
        .unwrap();
        assert_eq!(cfg.db_uri, "sqlite::memory:");
        assert_eq!(cfg.min_updated_at_secs, 60);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(Config::try_parse_from(["albiondata-api", "-m", "two days"]).is_err());
        assert!(Config::try_parse_from(["albiondata-api", "-m", "-1"]).is_err());
        assert!(Config::try_parse_from(["albiondata-api", "--db-max-connections", "0"]).is_err());
    }
}
