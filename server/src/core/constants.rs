// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Devspace";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "devspace";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".devspace";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "devspace.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "DEVSPACE_CONFIG";

// =============================================================================
// Environment Variables - Debug / Logging
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "DEVSPACE_DEBUG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "DEVSPACE_LOG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "DEVSPACE_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "DEVSPACE_PORT";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default request body limit (snippets can be large source files)
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Max seconds to wait for in-flight work during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Environment Variables - Entity Store
// =============================================================================

/// Environment variable for the entity store backend (memory or scylla)
pub const ENV_STORE_BACKEND: &str = "DEVSPACE_STORE_BACKEND";

/// Environment variable for update semantics on absent keys
pub const ENV_UPDATE_MODE: &str = "DEVSPACE_UPDATE_MODE";

/// Environment variable for Scylla contact points (comma separated host:port)
pub const ENV_SCYLLA_NODES: &str = "DEVSPACE_SCYLLA_NODES";

/// Environment variable for the Scylla keyspace
pub const ENV_SCYLLA_KEYSPACE: &str = "DEVSPACE_SCYLLA_KEYSPACE";

/// Environment variable for the Scylla username
pub const ENV_SCYLLA_USERNAME: &str = "SCYLLA";

/// Environment variable for the Scylla password
pub const ENV_SCYLLA_PASSWORD: &str = "SCYLLA_PASSWORD";

/// Environment variable for the preferred (local) datacenter
pub const ENV_SCYLLA_LOCAL_DC: &str = "DEVSPACE_SCYLLA_LOCAL_DC";

/// Environment variable for the default statement consistency
pub const ENV_SCYLLA_CONSISTENCY: &str = "DEVSPACE_SCYLLA_CONSISTENCY";

// =============================================================================
// Entity Store Defaults
// =============================================================================

/// Default Scylla contact point
pub const SCYLLA_DEFAULT_NODE: &str = "127.0.0.1:9042";

/// Default keyspace
pub const SCYLLA_DEFAULT_KEYSPACE: &str = "devspace";

/// Default replication factor for `CREATE KEYSPACE IF NOT EXISTS`
pub const SCYLLA_DEFAULT_REPLICATION_FACTOR: u32 = 3;

/// Default per-request timeout
pub const SCYLLA_DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Prepared statements kept by the caching session
pub const SCYLLA_PREPARED_CACHE_SIZE: usize = 128;

// =============================================================================
// Environment Variables - Moderation
// =============================================================================

/// Environment variable for the moderation provider (openai or none)
pub const ENV_MODERATION_PROVIDER: &str = "DEVSPACE_MODERATION_PROVIDER";

/// Environment variable for the moderation API key
pub const ENV_MODERATION_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable for the gate failure policy (closed or open)
pub const ENV_MODERATION_FAIL_POLICY: &str = "DEVSPACE_MODERATION_FAIL_POLICY";

// =============================================================================
// Moderation Defaults
// =============================================================================

/// Default moderation API base URL
pub const MODERATION_DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Moderation endpoint path (appended to base URL)
pub const MODERATION_ENDPOINT_PATH: &str = "/v1/moderations";

/// Default moderation request timeout
pub const MODERATION_DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default attempts per classification (1 = no retry)
pub const MODERATION_DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Base delay for moderation retry backoff
pub const MODERATION_RETRY_BASE_DELAY_MS: u64 = 200;
