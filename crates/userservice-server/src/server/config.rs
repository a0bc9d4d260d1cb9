use anyhow::{Context, bail};
use clap::Parser;
use core::time::Duration;
use std::net::SocketAddr;

/// Runtime configuration for the `userservice-server` binary.
///
/// Every value can be given as a CLI flag or through the environment (a
/// `.env` file is loaded before parsing).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "userservice-server",
    version,
    about = "A gRPC service for account registration and login"
)]
pub struct CliArgs {
    /// MongoDB connection string.
    ///
    /// Environment variable: `MONGODB_URI`
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: String,

    /// Database holding the account collection.
    ///
    /// Environment variable: `MONGODB_DATABASE`
    #[arg(long, env = "MONGODB_DATABASE", default_value_t = String::from("userdb"))]
    pub database: String,

    /// Collection holding one document per account.
    ///
    /// Environment variable: `MONGODB_COLLECTION`
    #[arg(long, env = "MONGODB_COLLECTION", default_value_t = String::from("users"))]
    pub collection: String,

    /// TCP address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Upper bound, in seconds, on connecting to the store and provisioning
    /// its indexes at startup.
    ///
    /// Environment variable: `STORE_CONNECT_TIMEOUT_SECS`
    #[arg(long, env = "STORE_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,
}

/// Settings for the account store connection.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
    pub store: StoreConfig,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.mongodb_uri.trim().is_empty() {
            bail!("MONGODB_URI must not be empty");
        }

        if args.database.is_empty() || args.collection.is_empty() {
            bail!("MONGODB_DATABASE and MONGODB_COLLECTION must not be empty");
        }

        if args.connect_timeout_secs == 0 {
            bail!("STORE_CONNECT_TIMEOUT_SECS must be greater than 0");
        }

        let server_addr = args.server_addr.parse::<SocketAddr>().with_context(|| {
            format!("SERVER_ADDR ({}) is not a socket address", args.server_addr)
        })?;

        Ok(Self {
            server_addr,
            store: StoreConfig {
                uri: args.mongodb_uri,
                database: args.database,
                collection: args.collection,
                connect_timeout: Duration::from_secs(args.connect_timeout_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> anyhow::Result<ServerConfig> {
        let mut argv = vec![
            "userservice-server",
            "--mongodb-uri",
            "mongodb://localhost:27017",
        ];
        argv.extend_from_slice(extra);
        ServerConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn flags_are_carried_into_config() {
        let config = parse(&[
            "--database",
            "accounts",
            "--collection",
            "people",
            "--server-addr",
            "127.0.0.1:6000",
            "--connect-timeout-secs",
            "3",
        ])
        .unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:6000".parse().unwrap());
        assert_eq!(config.store.uri, "mongodb://localhost:27017");
        assert_eq!(config.store.database, "accounts");
        assert_eq!(config.store.collection, "people");
        assert_eq!(config.store.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = parse(&["--connect-timeout-secs", "0"]).unwrap_err();
        assert!(err.to_string().contains("STORE_CONNECT_TIMEOUT_SECS"));
    }

    #[test]
    fn bad_listen_address_is_rejected() {
        let err = parse(&["--server-addr", "not-an-addr"]).unwrap_err();
        assert!(err.to_string().contains("SERVER_ADDR"));
    }

    #[test]
    fn blank_uri_is_rejected() {
        let args = CliArgs::try_parse_from(["userservice-server", "--mongodb-uri", "  "]).unwrap();
        assert!(ServerConfig::try_from(args).is_err());
    }
}
