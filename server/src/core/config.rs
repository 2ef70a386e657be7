use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, ENV_MODERATION_API_KEY,
    MODERATION_DEFAULT_BASE_URL, MODERATION_DEFAULT_MAX_ATTEMPTS, MODERATION_DEFAULT_TIMEOUT_SECS,
    SCYLLA_DEFAULT_KEYSPACE, SCYLLA_DEFAULT_NODE, SCYLLA_DEFAULT_REPLICATION_FACTOR,
    SCYLLA_DEFAULT_REQUEST_TIMEOUT_SECS,
};

// =============================================================================
// Store Backend Enum
// =============================================================================

/// Entity store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// ScyllaDB / Cassandra cluster
    Scylla,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Scylla => write!(f, "scylla"),
        }
    }
}

// =============================================================================
// Update Mode Enum
// =============================================================================

/// What an update does when the target key has no record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Write the record anyway (create-or-update)
    #[default]
    Upsert,
    /// Reject with not found and write nothing
    RequireExisting,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Upsert => write!(f, "upsert"),
            UpdateMode::RequireExisting => write!(f, "require_existing"),
        }
    }
}

// =============================================================================
// Consistency Level Enum
// =============================================================================

/// Default consistency for Scylla statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    One,
    LocalOne,
    Quorum,
    #[default]
    LocalQuorum,
    EachQuorum,
    All,
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsistencyLevel::One => "one",
            ConsistencyLevel::LocalOne => "local_one",
            ConsistencyLevel::Quorum => "quorum",
            ConsistencyLevel::LocalQuorum => "local_quorum",
            ConsistencyLevel::EachQuorum => "each_quorum",
            ConsistencyLevel::All => "all",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Moderation Enums
// =============================================================================

/// Content classification provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationProvider {
    /// OpenAI moderation endpoint (or any API-compatible service)
    #[default]
    Openai,
    /// Every text is classified safe (local development only)
    None,
}

impl fmt::Display for ModerationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModerationProvider::Openai => write!(f, "openai"),
            ModerationProvider::None => write!(f, "none"),
        }
    }
}

/// What the gate does when the classifier cannot be reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailPolicy {
    /// Reject the write
    #[default]
    Closed,
    /// Persist unchecked content and log a warning
    Open,
}

impl fmt::Display for FailPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailPolicy::Closed => write!(f, "closed"),
            FailPolicy::Open => write!(f, "open"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Origins allowed by CORS (exact match)
    pub cors_origins: Option<Vec<String>>,
}

/// Scylla configuration section (nested under store)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ScyllaFileConfig {
    pub nodes: Option<Vec<String>>,
    pub keyspace: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub local_datacenter: Option<String>,
    pub consistency: Option<ConsistencyLevel>,
    pub replication_factor: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

/// Entity store configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StoreFileConfig {
    pub backend: Option<StoreBackend>,
    pub update_mode: Option<UpdateMode>,
    pub scylla: Option<ScyllaFileConfig>,
}

/// Moderation configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ModerationFileConfig {
    pub provider: Option<ModerationProvider>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub fail_policy: Option<FailPolicy>,
    pub screen_updates: Option<bool>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub store: Option<StoreFileConfig>,
    pub moderation: Option<ModerationFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

macro_rules! merge_field {
    ($current:expr, $other:expr, $field:ident, $label:literal) => {
        if $other.$field.is_some() {
            tracing::trace!(value = ?$other.$field, concat!("Merging ", $label));
            $current.$field = $other.$field;
        }
    };
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            merge_field!(current, server, host, "server.host");
            merge_field!(current, server, port, "server.port");
            merge_field!(current, server, cors_origins, "server.cors_origins");
        }

        if let Some(store) = other.store {
            let current = self.store.get_or_insert_with(StoreFileConfig::default);
            merge_field!(current, store, backend, "store.backend");
            merge_field!(current, store, update_mode, "store.update_mode");

            if let Some(scylla) = store.scylla {
                let cur = current.scylla.get_or_insert_with(ScyllaFileConfig::default);
                merge_field!(cur, scylla, nodes, "store.scylla.nodes");
                merge_field!(cur, scylla, keyspace, "store.scylla.keyspace");
                merge_field!(cur, scylla, username, "store.scylla.username");
                merge_field!(cur, scylla, password, "store.scylla.password");
                merge_field!(cur, scylla, local_datacenter, "store.scylla.local_datacenter");
                merge_field!(cur, scylla, consistency, "store.scylla.consistency");
                merge_field!(
                    cur,
                    scylla,
                    replication_factor,
                    "store.scylla.replication_factor"
                );
                merge_field!(
                    cur,
                    scylla,
                    request_timeout_secs,
                    "store.scylla.request_timeout_secs"
                );
            }
        }

        if let Some(moderation) = other.moderation {
            let current = self
                .moderation
                .get_or_insert_with(ModerationFileConfig::default);
            merge_field!(current, moderation, provider, "moderation.provider");
            merge_field!(current, moderation, api_key, "moderation.api_key");
            merge_field!(current, moderation, base_url, "moderation.base_url");
            merge_field!(current, moderation, model, "moderation.model");
            merge_field!(current, moderation, timeout_secs, "moderation.timeout_secs");
            merge_field!(current, moderation, max_attempts, "moderation.max_attempts");
            merge_field!(current, moderation, fail_policy, "moderation.fail_policy");
            merge_field!(
                current,
                moderation,
                screen_updates,
                "moderation.screen_updates"
            );
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// Scylla connection configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    /// Contact points as host:port
    pub nodes: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Preferred datacenter for load balancing (None = no preference)
    pub local_datacenter: Option<String>,
    pub consistency: ConsistencyLevel,
    pub replication_factor: u32,
    pub request_timeout_secs: u64,
}

impl ScyllaConfig {
    fn resolve(file_scylla: ScyllaFileConfig, cli: &CliConfig) -> Self {
        Self {
            nodes: cli
                .scylla_nodes
                .clone()
                .or(file_scylla.nodes)
                .unwrap_or_else(|| vec![SCYLLA_DEFAULT_NODE.to_string()]),
            keyspace: cli
                .scylla_keyspace
                .clone()
                .or(file_scylla.keyspace)
                .unwrap_or_else(|| SCYLLA_DEFAULT_KEYSPACE.to_string()),
            username: cli.scylla_username.clone().or(file_scylla.username),
            password: cli.scylla_password.clone().or(file_scylla.password),
            local_datacenter: cli
                .scylla_local_dc
                .clone()
                .or(file_scylla.local_datacenter),
            consistency: cli
                .scylla_consistency
                .or(file_scylla.consistency)
                .unwrap_or_default(),
            replication_factor: file_scylla
                .replication_factor
                .unwrap_or(SCYLLA_DEFAULT_REPLICATION_FACTOR),
            request_timeout_secs: file_scylla
                .request_timeout_secs
                .unwrap_or(SCYLLA_DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() || self.nodes.iter().any(|n| n.trim().is_empty()) {
            anyhow::bail!(
                "Configuration error: store.scylla.nodes must list at least one host:port"
            );
        }
        // Keyspace is interpolated into CQL, so it must be a plain identifier
        if !is_valid_cql_identifier(&self.keyspace) {
            anyhow::bail!(
                "Configuration error: store.scylla.keyspace '{}' must start with a letter and contain only letters, digits or underscores (max 48 chars)",
                self.keyspace
            );
        }
        if self.replication_factor == 0 {
            anyhow::bail!(
                "Configuration error: store.scylla.replication_factor must be at least 1"
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!(
                "Configuration error: store.scylla.request_timeout_secs must be greater than 0"
            );
        }
        if self.username.is_some() != self.password.is_some() {
            anyhow::bail!(
                "Configuration error: store.scylla.username and store.scylla.password must be set together"
            );
        }
        Ok(())
    }
}

/// Entity store configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub update_mode: UpdateMode,
    /// Only populated when backend = scylla
    pub scylla: Option<ScyllaConfig>,
}

/// Content moderation configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    pub provider: ModerationProvider,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: Option<String>,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub fail_policy: FailPolicy,
    /// Run updates of free-text fields through the gate as well
    pub screen_updates: bool,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub moderation: ModerationConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.devspace/devspace.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let file_config = Self::load_file_config(cli)?;
        Self::from_sources(file_config, cli)
    }

    /// Scylla settings for `devspace schema`, resolved from the same file and
    /// CLI layers as `load` whether or not scylla is the selected backend
    pub fn load_scylla(cli: &CliConfig) -> Result<ScyllaConfig> {
        let file_config = Self::load_file_config(cli)?;
        let file_scylla = file_config
            .store
            .and_then(|store| store.scylla)
            .unwrap_or_default();
        let scylla = ScyllaConfig::resolve(file_scylla, cli);
        scylla.validate()?;
        Ok(scylla)
    }

    /// Merge the profile config with the local or `--config` overlay
    fn load_file_config(cli: &CliConfig) -> Result<FileConfig> {
        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Ok(file_config)
    }

    /// Layer defaults, a merged file config and CLI/env overrides, then validate
    pub fn from_sources(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_store = file_config.store.unwrap_or_default();
        let file_scylla = file_store.scylla.unwrap_or_default();
        let file_moderation = file_config.moderation.unwrap_or_default();

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
            cors_origins: file_server.cors_origins.unwrap_or_default(),
        };

        let backend = cli.store_backend.or(file_store.backend).unwrap_or_default();
        let update_mode = cli
            .update_mode
            .or(file_store.update_mode)
            .unwrap_or_default();

        // Scylla section only materializes when it is the selected backend
        let scylla =
            (backend == StoreBackend::Scylla).then(|| ScyllaConfig::resolve(file_scylla, cli));

        let moderation = ModerationConfig {
            provider: cli
                .moderation_provider
                .or(file_moderation.provider)
                .unwrap_or_default(),
            api_key: cli
                .moderation_api_key
                .clone()
                .or(file_moderation.api_key)
                .filter(|k| !k.is_empty()),
            base_url: file_moderation
                .base_url
                .unwrap_or_else(|| MODERATION_DEFAULT_BASE_URL.to_string()),
            model: file_moderation.model,
            timeout_secs: file_moderation
                .timeout_secs
                .unwrap_or(MODERATION_DEFAULT_TIMEOUT_SECS),
            max_attempts: file_moderation
                .max_attempts
                .unwrap_or(MODERATION_DEFAULT_MAX_ATTEMPTS),
            fail_policy: cli
                .moderation_fail_policy
                .or(file_moderation.fail_policy)
                .unwrap_or_default(),
            screen_updates: file_moderation.screen_updates.unwrap_or(true),
        };

        let config = Self {
            server,
            store: StoreConfig {
                backend,
                update_mode,
                scylla,
            },
            moderation,
            debug: cli.debug || file_config.debug.unwrap_or(false),
        };

        config.validate()?;
        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            store = %config.store.backend,
            update_mode = %config.store.update_mode,
            moderation = %config.moderation.provider,
            fail_policy = %config.moderation.fail_policy,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if let Some(ref scylla) = self.store.scylla {
            scylla.validate()?;
        }

        if self.store.backend == StoreBackend::Memory {
            tracing::warn!("Using in-memory entity store, all records are lost on restart");
        }

        match self.moderation.provider {
            ModerationProvider::Openai => {
                if self.moderation.api_key.is_none() {
                    anyhow::bail!(
                        "Configuration error: moderation.api_key is required when moderation.provider is 'openai'. \
                         Set via {} env var or moderation.api_key in config file, \
                         or use --moderation-provider none for local development.",
                        ENV_MODERATION_API_KEY
                    );
                }
                let url = &self.moderation.base_url;
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!(
                        "Configuration error: moderation.base_url must start with http:// or https://. Got: {}",
                        url
                    );
                }
            }
            ModerationProvider::None => {
                tracing::warn!(
                    "Content moderation is disabled, user-submitted text is stored unchecked"
                );
            }
        }

        if self.moderation.max_attempts == 0 {
            anyhow::bail!("Configuration error: moderation.max_attempts must be at least 1");
        }
        if self.moderation.timeout_secs == 0 {
            anyhow::bail!("Configuration error: moderation.timeout_secs must be greater than 0");
        }
        if self.moderation.fail_policy == FailPolicy::Open {
            tracing::warn!(
                "moderation.fail_policy is 'open', content is persisted unchecked when the classifier is unreachable"
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.devspace/devspace.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

/// Unquoted CQL identifiers: letter first, then letters/digits/underscore
pub fn is_valid_cql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && name.len() <= 48
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_cli() -> CliConfig {
        CliConfig {
            moderation_provider: Some(ModerationProvider::None),
            ..Default::default()
        }
    }

    #[test]
    fn test_store_backend_serde() {
        let backend: StoreBackend = serde_json::from_str(r#""scylla""#).unwrap();
        assert_eq!(backend, StoreBackend::Scylla);
        let backend: StoreBackend = serde_json::from_str(r#""memory""#).unwrap();
        assert_eq!(backend, StoreBackend::Memory);
    }

    #[test]
    fn test_update_mode_serde_and_display() {
        let mode: UpdateMode = serde_json::from_str(r#""require_existing""#).unwrap();
        assert_eq!(mode, UpdateMode::RequireExisting);
        assert_eq!(mode.to_string(), "require_existing");
        assert_eq!(UpdateMode::default(), UpdateMode::Upsert);
    }

    #[test]
    fn test_consistency_display() {
        assert_eq!(ConsistencyLevel::LocalQuorum.to_string(), "local_quorum");
        assert_eq!(ConsistencyLevel::default(), ConsistencyLevel::LocalQuorum);
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "server": { "host": "0.0.0.0", "port": 8080 },
            "store": {
                "backend": "scylla",
                "update_mode": "require_existing",
                "scylla": { "nodes": ["a:9042", "b:9042"], "keyspace": "snips", "consistency": "quorum" }
            },
            "moderation": { "provider": "openai", "fail_policy": "open", "screen_updates": false }
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, Some(8080));

        let store = config.store.as_ref().unwrap();
        assert_eq!(store.backend, Some(StoreBackend::Scylla));
        assert_eq!(store.update_mode, Some(UpdateMode::RequireExisting));
        let scylla = store.scylla.as_ref().unwrap();
        assert_eq!(scylla.nodes.as_ref().unwrap().len(), 2);
        assert_eq!(scylla.consistency, Some(ConsistencyLevel::Quorum));

        let moderation = config.moderation.as_ref().unwrap();
        assert_eq!(moderation.fail_policy, Some(FailPolicy::Open));
        assert_eq!(moderation.screen_updates, Some(false));
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "server": { "host": "localhost" }, "unknown_field": 123 }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extra.get("unknown_field").unwrap(), 123);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base: FileConfig = serde_json::from_str(
            r#"{
                "server": { "host": "base.host", "port": 1000 },
                "store": { "backend": "scylla", "scylla": { "keyspace": "one", "replication_factor": 1 } },
                "debug": false
            }"#,
        )
        .unwrap();
        let overlay: FileConfig = serde_json::from_str(
            r#"{
                "server": { "port": 2000 },
                "store": { "scylla": { "keyspace": "two" } },
                "debug": true
            }"#,
        )
        .unwrap();

        base.merge(overlay);

        let server = base.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("base.host"));
        assert_eq!(server.port, Some(2000));
        let scylla = base.store.as_ref().unwrap().scylla.as_ref().unwrap();
        assert_eq!(scylla.keyspace.as_deref(), Some("two"));
        assert_eq!(scylla.replication_factor, Some(1));
        assert_eq!(base.store.as_ref().unwrap().backend, Some(StoreBackend::Scylla));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_sources(FileConfig::default(), &dev_cli()).unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.update_mode, UpdateMode::Upsert);
        assert!(config.store.scylla.is_none());
        assert_eq!(config.moderation.fail_policy, FailPolicy::Closed);
        assert!(config.moderation.screen_updates);
        assert!(!config.debug);
    }

    #[test]
    fn test_app_config_openai_requires_key() {
        let err = AppConfig::from_sources(FileConfig::default(), &CliConfig::default())
            .unwrap_err()
            .to_string();
        assert!(err.contains("moderation.api_key"));

        let cli = CliConfig {
            moderation_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let config = AppConfig::from_sources(FileConfig::default(), &cli).unwrap();
        assert_eq!(config.moderation.provider, ModerationProvider::Openai);
        assert_eq!(config.moderation.base_url, MODERATION_DEFAULT_BASE_URL);
    }

    #[test]
    fn test_app_config_cli_override() {
        let file: FileConfig = serde_json::from_str(
            r#"{ "server": { "port": 7000 }, "store": { "update_mode": "upsert" } }"#,
        )
        .unwrap();
        let cli = CliConfig {
            host: Some("cli.host".to_string()),
            port: Some(3000),
            update_mode: Some(UpdateMode::RequireExisting),
            moderation_fail_policy: Some(FailPolicy::Open),
            debug: true,
            ..dev_cli()
        };
        let config = AppConfig::from_sources(file, &cli).unwrap();

        assert_eq!(config.server.host, "cli.host");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.update_mode, UpdateMode::RequireExisting);
        assert_eq!(config.moderation.fail_policy, FailPolicy::Open);
        assert!(config.debug);
    }

    #[test]
    fn test_app_config_scylla_defaults() {
        let cli = CliConfig {
            store_backend: Some(StoreBackend::Scylla),
            ..dev_cli()
        };
        let config = AppConfig::from_sources(FileConfig::default(), &cli).unwrap();
        let scylla = config.store.scylla.unwrap();

        assert_eq!(scylla.nodes, vec![SCYLLA_DEFAULT_NODE.to_string()]);
        assert_eq!(scylla.keyspace, SCYLLA_DEFAULT_KEYSPACE);
        assert_eq!(scylla.consistency, ConsistencyLevel::LocalQuorum);
        assert_eq!(scylla.replication_factor, SCYLLA_DEFAULT_REPLICATION_FACTOR);
    }

    #[test]
    fn test_app_config_validation_bad_keyspace() {
        let cli = CliConfig {
            store_backend: Some(StoreBackend::Scylla),
            scylla_keyspace: Some("drop table; --".to_string()),
            ..dev_cli()
        };
        let err = AppConfig::from_sources(FileConfig::default(), &cli)
            .unwrap_err()
            .to_string();
        assert!(err.contains("keyspace"));
    }

    #[test]
    fn test_app_config_validation_half_credentials() {
        let cli = CliConfig {
            store_backend: Some(StoreBackend::Scylla),
            scylla_username: Some("scylla".to_string()),
            ..dev_cli()
        };
        assert!(AppConfig::from_sources(FileConfig::default(), &cli).is_err());
    }

    #[test]
    fn test_app_config_validation_port_zero() {
        let cli = CliConfig {
            port: Some(0),
            ..dev_cli()
        };
        assert!(AppConfig::from_sources(FileConfig::default(), &cli).is_err());
    }

    #[test]
    fn test_app_config_validation_zero_attempts() {
        let file: FileConfig =
            serde_json::from_str(r#"{ "moderation": { "max_attempts": 0 } }"#).unwrap();
        assert!(AppConfig::from_sources(file, &dev_cli()).is_err());
    }

    #[test]
    fn test_load_from_cli_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(
            &path,
            r#"{ "server": { "port": 6100 }, "moderation": { "provider": "none" } }"#,
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 6100);
        assert_eq!(config.moderation.provider, ModerationProvider::None);
    }

    #[test]
    fn test_load_missing_config_path() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..dev_cli()
        };
        assert!(AppConfig::load(&cli).is_err());
    }

    #[test]
    fn test_load_scylla_uses_file_settings_with_memory_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{ "store": { "backend": "memory", "scylla": { "keyspace": "snips", "replication_factor": 1 } } }"#,
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let scylla = AppConfig::load_scylla(&cli).unwrap();
        assert_eq!(scylla.keyspace, "snips");
        assert_eq!(scylla.replication_factor, 1);
    }

    #[test]
    fn test_load_scylla_cli_keyspace_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{ "store": { "scylla": { "keyspace": "snips" } } }"#).unwrap();

        let cli = CliConfig {
            config: Some(path),
            scylla_keyspace: Some("override".to_string()),
            ..Default::default()
        };
        let scylla = AppConfig::load_scylla(&cli).unwrap();
        assert_eq!(scylla.keyspace, "override");
        assert_eq!(scylla.replication_factor, SCYLLA_DEFAULT_REPLICATION_FACTOR);
    }

    #[test]
    fn test_load_scylla_rejects_bad_keyspace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{}").unwrap();

        let cli = CliConfig {
            config: Some(path),
            scylla_keyspace: Some("drop table".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::load_scylla(&cli).is_err());
    }

    #[test]
    fn test_is_valid_cql_identifier() {
        assert!(is_valid_cql_identifier("devspace"));
        assert!(is_valid_cql_identifier("dev_space_2"));
        assert!(!is_valid_cql_identifier("2dev"));
        assert!(!is_valid_cql_identifier(""));
        assert!(!is_valid_cql_identifier("dev-space"));
        assert!(!is_valid_cql_identifier(&"a".repeat(49)));
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(!is_all_interfaces("127.0.0.1"));
    }
}
