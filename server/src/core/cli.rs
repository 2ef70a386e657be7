use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::{ConsistencyLevel, FailPolicy, ModerationProvider, StoreBackend, UpdateMode};
use super::constants::{
    ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_MODERATION_API_KEY, ENV_MODERATION_FAIL_POLICY,
    ENV_MODERATION_PROVIDER, ENV_PORT, ENV_SCYLLA_CONSISTENCY, ENV_SCYLLA_KEYSPACE,
    ENV_SCYLLA_LOCAL_DC, ENV_SCYLLA_NODES, ENV_SCYLLA_PASSWORD, ENV_SCYLLA_USERNAME,
    ENV_STORE_BACKEND, ENV_UPDATE_MODE,
};

#[derive(Parser)]
#[command(name = "devspace")]
#[command(version, about = "Code snippet sharing backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (verbose logging)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    // Store options
    /// Entity store backend (memory or scylla)
    #[arg(long, global = true, env = ENV_STORE_BACKEND, value_parser = parse_store_backend)]
    pub store_backend: Option<StoreBackend>,

    /// Update behavior for absent records (upsert or require_existing)
    #[arg(long, global = true, env = ENV_UPDATE_MODE, value_parser = parse_update_mode)]
    pub update_mode: Option<UpdateMode>,

    /// Scylla contact points, comma separated host:port
    #[arg(long, global = true, env = ENV_SCYLLA_NODES, value_delimiter = ',')]
    pub scylla_nodes: Option<Vec<String>>,

    /// Scylla keyspace
    #[arg(long, global = true, env = ENV_SCYLLA_KEYSPACE)]
    pub scylla_keyspace: Option<String>,

    /// Scylla username
    #[arg(long, global = true, env = ENV_SCYLLA_USERNAME)]
    pub scylla_username: Option<String>,

    /// Scylla password
    #[arg(long, global = true, env = ENV_SCYLLA_PASSWORD, hide_env_values = true)]
    pub scylla_password: Option<String>,

    /// Preferred datacenter for token-aware routing
    #[arg(long, global = true, env = ENV_SCYLLA_LOCAL_DC)]
    pub scylla_local_dc: Option<String>,

    /// Default statement consistency
    #[arg(long, global = true, env = ENV_SCYLLA_CONSISTENCY, value_parser = parse_consistency)]
    pub scylla_consistency: Option<ConsistencyLevel>,

    // Moderation options
    /// Content moderation provider (openai or none)
    #[arg(long, global = true, env = ENV_MODERATION_PROVIDER, value_parser = parse_moderation_provider)]
    pub moderation_provider: Option<ModerationProvider>,

    /// Moderation API key
    #[arg(long, global = true, env = ENV_MODERATION_API_KEY, hide_env_values = true)]
    pub moderation_api_key: Option<String>,

    /// Behavior when the classifier is unreachable (closed or open)
    #[arg(long, global = true, env = ENV_MODERATION_FAIL_POLICY, value_parser = parse_fail_policy)]
    pub moderation_fail_policy: Option<FailPolicy>,
}

/// Parse store backend from CLI/env string
fn parse_store_backend(s: &str) -> Result<StoreBackend, String> {
    match s.to_lowercase().as_str() {
        "memory" => Ok(StoreBackend::Memory),
        "scylla" | "cassandra" => Ok(StoreBackend::Scylla),
        _ => Err(format!(
            "Invalid store backend '{}'. Valid options: memory, scylla",
            s
        )),
    }
}

/// Parse update mode from CLI/env string
fn parse_update_mode(s: &str) -> Result<UpdateMode, String> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "upsert" => Ok(UpdateMode::Upsert),
        "require_existing" => Ok(UpdateMode::RequireExisting),
        _ => Err(format!(
            "Invalid update mode '{}'. Valid options: upsert, require_existing",
            s
        )),
    }
}

/// Parse consistency level from CLI/env string
fn parse_consistency(s: &str) -> Result<ConsistencyLevel, String> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "one" => Ok(ConsistencyLevel::One),
        "local_one" => Ok(ConsistencyLevel::LocalOne),
        "quorum" => Ok(ConsistencyLevel::Quorum),
        "local_quorum" => Ok(ConsistencyLevel::LocalQuorum),
        "each_quorum" => Ok(ConsistencyLevel::EachQuorum),
        "all" => Ok(ConsistencyLevel::All),
        _ => Err(format!(
            "Invalid consistency '{}'. Valid options: one, local_one, quorum, \
             local_quorum, each_quorum, all",
            s
        )),
    }
}

/// Parse moderation provider from CLI/env string
fn parse_moderation_provider(s: &str) -> Result<ModerationProvider, String> {
    match s.to_lowercase().as_str() {
        "openai" => Ok(ModerationProvider::Openai),
        "none" | "off" => Ok(ModerationProvider::None),
        _ => Err(format!(
            "Invalid moderation provider '{}'. Valid options: openai, none",
            s
        )),
    }
}

/// Parse fail policy from CLI/env string
fn parse_fail_policy(s: &str) -> Result<FailPolicy, String> {
    match s.to_lowercase().as_str() {
        "closed" => Ok(FailPolicy::Closed),
        "open" => Ok(FailPolicy::Open),
        _ => Err(format!(
            "Invalid fail policy '{}'. Valid options: closed, open",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Print the CQL schema (keyspace and tables) for the configured store and exit
    Schema,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub store_backend: Option<StoreBackend>,
    pub update_mode: Option<UpdateMode>,
    pub scylla_nodes: Option<Vec<String>>,
    pub scylla_keyspace: Option<String>,
    pub scylla_username: Option<String>,
    pub scylla_password: Option<String>,
    pub scylla_local_dc: Option<String>,
    pub scylla_consistency: Option<ConsistencyLevel>,
    pub moderation_provider: Option<ModerationProvider>,
    pub moderation_api_key: Option<String>,
    pub moderation_fail_policy: Option<FailPolicy>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            debug: cli.debug,
            config: cli.config,
            store_backend: cli.store_backend,
            update_mode: cli.update_mode,
            scylla_nodes: cli.scylla_nodes,
            scylla_keyspace: cli.scylla_keyspace,
            scylla_username: cli.scylla_username,
            scylla_password: cli.scylla_password,
            scylla_local_dc: cli.scylla_local_dc,
            scylla_consistency: cli.scylla_consistency,
            moderation_provider: cli.moderation_provider,
            moderation_api_key: cli.moderation_api_key,
            moderation_fail_policy: cli.moderation_fail_policy,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (CliConfig::from(cli), command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_store_backend() {
        assert_eq!(parse_store_backend("memory"), Ok(StoreBackend::Memory));
        assert_eq!(parse_store_backend("Scylla"), Ok(StoreBackend::Scylla));
        assert_eq!(parse_store_backend("cassandra"), Ok(StoreBackend::Scylla));
        assert!(parse_store_backend("postgres").is_err());
    }

    #[test]
    fn test_parse_update_mode() {
        assert_eq!(parse_update_mode("upsert"), Ok(UpdateMode::Upsert));
        assert_eq!(
            parse_update_mode("require-existing"),
            Ok(UpdateMode::RequireExisting)
        );
        assert!(parse_update_mode("strict").is_err());
    }

    #[test]
    fn test_parse_consistency() {
        assert_eq!(
            parse_consistency("LOCAL_QUORUM"),
            Ok(ConsistencyLevel::LocalQuorum)
        );
        assert_eq!(parse_consistency("one"), Ok(ConsistencyLevel::One));
        assert!(parse_consistency("two").is_err());
    }

    #[test]
    fn test_parse_moderation_options() {
        assert_eq!(
            parse_moderation_provider("none"),
            Ok(ModerationProvider::None)
        );
        assert_eq!(parse_fail_policy("open"), Ok(FailPolicy::Open));
        assert!(parse_fail_policy("sometimes").is_err());
    }

    #[test]
    fn test_cli_parse_args() {
        let cli = Cli::try_parse_from([
            "devspace",
            "--port",
            "8000",
            "--store-backend",
            "scylla",
            "--scylla-nodes",
            "10.0.0.1:9042,10.0.0.2:9042",
            "--moderation-fail-policy",
            "open",
            "schema",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Schema)));

        let config = CliConfig::from(cli);
        assert_eq!(config.port, Some(8000));
        assert_eq!(config.store_backend, Some(StoreBackend::Scylla));
        assert_eq!(
            config.scylla_nodes,
            Some(vec!["10.0.0.1:9042".to_string(), "10.0.0.2:9042".to_string()])
        );
        assert_eq!(config.moderation_fail_policy, Some(FailPolicy::Open));
    }
}
