use thiserror::Error;

/// Errors surfaced by the store and the match service
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Named player or match id does not exist
    #[error("{0}")]
    NotFound(String),

    /// Input rejected before any counter is touched
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl TrackerError {
    pub fn player_not_found(name: &str) -> Self {
        TrackerError::NotFound(format!("Player '{}' not found", name))
    }

    pub fn match_not_found(id: uuid::Uuid) -> Self {
        TrackerError::NotFound(format!("Match {} not found", id))
    }

    pub fn counter_out_of_range(name: &str) -> Self {
        TrackerError::Validation(format!("Counter out of range for player '{}'", name))
    }
}
