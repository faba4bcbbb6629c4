use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use rivalry_tracker::run;
use rivalry_tracker::config::settings::{get_config, DatabaseSettings, ServiceSettings};
use rivalry_tracker::db::{MemoryStore, PgStore, RivalryStore};
use rivalry_tracker::game::roster::Roster;
use rivalry_tracker::telemetry::{get_subscriber, init_subscriber};

pub const ME: &str = "Shakthi";
pub const FRIEND: &str = "Shynu";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub address: String,
    pub store: Arc<dyn RivalryStore>,
    pub client: Client,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_reset(true).await
}

pub async fn spawn_app_with_reset(allow_reset: bool) -> TestApp {
    spawn_app_with_store(Arc::new(MemoryStore::new()), allow_reset).await
}

/// Same server on a fresh Postgres database, or `None` when no server is reachable
pub async fn spawn_pg_app() -> Option<TestApp> {
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;

    let connection_pool = configure_db(&configuration.database).await?;
    let store = PgStore::new(connection_pool);
    Some(spawn_app_with_store(Arc::new(store), true).await)
}

async fn spawn_app_with_store(store: Arc<dyn RivalryStore>, allow_reset: bool) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let roster = Roster::new(ME, FRIEND).expect("Invalid test roster");
    store.seed_players(&roster).await.expect("Failed to seed players");

    let settings = ServiceSettings {
        roster,
        allow_reset,
        allowed_origins: vec![],
    };
    let server = run(listener, store.clone(), settings)
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: Client::new(),
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> Option<PgPool> {
    let mut connection = match PgConnection::connect(
            config.connection_string_without_db().expose_secret()
        )
        .await
    {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("Skipping Postgres test, no database reachable: {}", e);
            return None;
        }
    };
    // Create database
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    Some(connection_pool)
}

impl TestApp {
    pub async fn increment(&self, name: &str, increments: &Value) -> reqwest::Response {
        self.client
            .patch(&format!("{}/api/players/{}/increment", self.address, name))
            .json(increments)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_player(&self, name: &str) -> Value {
        let response = self.client
            .get(&format!("{}/api/players/{}", self.address, name))
            .send()
            .await
            .expect("Failed to execute request.");
        assert!(response.status().is_success(), "player lookup failed: {}", response.status());
        let body: Value = response.json().await.expect("Failed to parse player response");
        body["data"].clone()
    }

    pub async fn post_match(&self, payload: &Value) -> reqwest::Response {
        self.client
            .post(&format!("{}/api/matches", self.address))
            .json(payload)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn reverse_match(&self, payload: &Value) -> reqwest::Response {
        self.client
            .post(&format!("{}/api/matches/reverse", self.address))
            .json(payload)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn history(&self) -> Vec<Value> {
        let response = self.client
            .get(&format!("{}/api/history", self.address))
            .send()
            .await
            .expect("Failed to execute request.");
        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse history response");
        body["data"].as_array().cloned().unwrap_or_default()
    }
}

/// `{result: win, me_normalGoals: 2, friend_ownGoals: 1}`
pub fn win_with_own_goal() -> Value {
    json!({
        "matchDate": "2024-06-01",
        "result": "win",
        "me_normalGoals": 2,
        "friend_ownGoals": 1
    })
}
