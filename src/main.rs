use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use rivalry_tracker::run;
use rivalry_tracker::config::settings::{get_config, StorageBackend};
use rivalry_tracker::db::{MemoryStore, PgStore, RivalryStore};
use rivalry_tracker::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "rivalry-tracker".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let store: Arc<dyn RivalryStore> = match config.database.backend {
        StorageBackend::Postgres => {
            // Only try to establish connection when actually used
            let connection_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect_lazy(
                    config.database.connection_string().expose_secret()
                )
                .expect("Failed to create Postgres connection pool");
            let store = PgStore::new(connection_pool);
            if let Err(e) = store.migrate().await {
                tracing::error!("❌ Failed to run database migrations: {}", e);
                std::process::exit(1);
            }
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    if let Err(e) = store.seed_players(&config.roster).await {
        tracing::error!("❌ Failed to seed roster players: {}", e);
        std::process::exit(1);
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("✅ Rivalry tracker listening on {} ({} vs {})",
        address, config.roster.me, config.roster.friend);

    run(
        listener,
        store,
        config.service_settings()
    )?.await
}
