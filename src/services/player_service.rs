use std::sync::Arc;

use crate::db::store::RivalryStore;
use crate::error::TrackerError;
use crate::game::match_validator::MatchValidator;
use crate::game::roster::Roster;
use crate::models::common::Role;
use crate::models::player::{Player, PlayerFieldsUpdate, StatIncrements};

/// Lookups and direct stat edits; bypasses the stat calculator
pub struct PlayerService {
    store: Arc<dyn RivalryStore>,
    roster: Roster,
    validator: MatchValidator,
}

impl PlayerService {
    pub fn new(store: Arc<dyn RivalryStore>, roster: Roster) -> Self {
        Self {
            store,
            roster,
            validator: MatchValidator::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Player>, TrackerError> {
        self.store.list_players().await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Player, TrackerError> {
        self.store.find_player_by_name(name).await
    }

    pub async fn find_by_role(&self, role: Role) -> Result<Player, TrackerError> {
        self.store.find_player_by_name(self.roster.name_for(role)).await
    }

    #[tracing::instrument(name = "Replace player fields", skip(self, fields))]
    pub async fn replace_fields(&self, name: &str, fields: &PlayerFieldsUpdate) -> Result<Player, TrackerError> {
        self.validator.validate_fields_update(fields)?;
        self.store.replace_fields(name, fields).await
    }

    /// Raw increment, applied as sent
    #[tracing::instrument(name = "Increment player", skip(self, increments))]
    pub async fn increment(&self, name: &str, increments: &StatIncrements) -> Result<Player, TrackerError> {
        if increments.is_empty() {
            tracing::debug!("Empty increment for {}, returning current record", name);
            return self.store.find_player_by_name(name).await;
        }
        self.store.apply_increment(name, increments).await
    }

    /// Wipe every player and match and start again from the configured roster
    #[tracing::instrument(name = "Reset rivalry", skip(self))]
    pub async fn reset(&self) -> Result<Vec<Player>, TrackerError> {
        tracing::warn!("Resetting all players and match history");
        self.store.reset(&self.roster).await
    }
}
