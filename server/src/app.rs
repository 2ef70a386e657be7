//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::EntityStore;
use crate::data::scylla::schema;
use crate::domain::{ContentGate, ResourceOptions, Resources};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub store: Arc<EntityStore>,
    pub resources: Arc<Resources>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Schema) => return Self::print_schema(&cli_config),
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        Self::start_server(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let store = Arc::new(
            EntityStore::init(&config.store)
                .await
                .context("Failed to initialize entity store")?,
        );
        tracing::debug!(backend = store.backend_name(), "Entity store initialized");

        let gate = Arc::new(
            ContentGate::from_config(&config.moderation)
                .context("Failed to initialize content moderation")?,
        );

        let options = ResourceOptions::new(&config.store, config.moderation.screen_updates);
        let resources = Arc::new(Resources::new(store.clone(), gate, options));
        let shutdown = ShutdownService::new(store.clone());

        Ok(Self {
            shutdown,
            config,
            store,
            resources,
        })
    }

    /// `devspace schema`: print the keyspace and table DDL that startup applies
    fn print_schema(cli: &CliConfig) -> Result<()> {
        let scylla = AppConfig::load_scylla(cli).context("Failed to resolve scylla settings")?;
        for statement in schema::schema_statements(&scylla.keyspace, scylla.replication_factor) {
            println!("{};\n", statement);
        }
        Ok(())
    }

    fn init_logging(debug: bool) {
        let level = if debug { "debug" } else { "info" };
        let default_filter = format!("info,{}={}", APP_NAME_LOWER, level);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        banner::print_banner(
            &app.config,
            app.store.backend_name(),
            app.resources.gate().provider_name(),
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }
}
