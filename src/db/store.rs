use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TrackerError;
use crate::game::roster::Roster;
use crate::game::stats_calculator::MatchDeltas;
use crate::models::match_record::{MatchPayload, MatchRecord};
use crate::models::player::{Player, PlayerFieldsUpdate, StatIncrements};

/// What happens to the match log alongside a pair of stat updates
#[derive(Debug, Clone, Copy)]
pub enum LogChange<'a> {
    Append(&'a MatchPayload),
    Remove(Uuid),
    Keep,
}

/// Both players after a match was applied or reversed
#[derive(Debug, Clone)]
pub struct AppliedMatch {
    pub me: Player,
    pub friend: Player,
    /// Set when the log change appended a new record
    pub logged: Option<MatchRecord>,
}

/// Persistence for the two player records and the match log.
///
/// Every single-record method is atomic on its own. `apply_match` is the one
/// multi-record operation: both player updates and the log change commit
/// together or not at all.
#[async_trait]
pub trait RivalryStore: Send + Sync {
    async fn find_player_by_name(&self, name: &str) -> Result<Player, TrackerError>;

    async fn list_players(&self) -> Result<Vec<Player>, TrackerError>;

    async fn apply_increment(
        &self,
        name: &str,
        increments: &StatIncrements,
    ) -> Result<Player, TrackerError>;

    async fn replace_fields(
        &self,
        name: &str,
        fields: &PlayerFieldsUpdate,
    ) -> Result<Player, TrackerError>;

    async fn append_match(&self, payload: &MatchPayload) -> Result<MatchRecord, TrackerError>;

    /// Newest first
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, TrackerError>;

    async fn update_match(
        &self,
        id: Uuid,
        payload: &MatchPayload,
    ) -> Result<MatchRecord, TrackerError>;

    async fn delete_match(&self, id: Uuid) -> Result<(), TrackerError>;

    async fn apply_match(
        &self,
        roster: &Roster,
        deltas: &MatchDeltas,
        log: LogChange<'_>,
    ) -> Result<AppliedMatch, TrackerError>;

    /// Create any roster player that does not exist yet, returning how many were created
    async fn seed_players(&self, roster: &Roster) -> Result<usize, TrackerError>;

    /// Drop every player and match, then seed the roster again from zero
    async fn reset(&self, roster: &Roster) -> Result<Vec<Player>, TrackerError>;
}
