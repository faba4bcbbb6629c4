use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::store::{AppliedMatch, LogChange, RivalryStore};
use crate::error::TrackerError;
use crate::game::roster::Roster;
use crate::game::stats_calculator::MatchDeltas;
use crate::models::match_record::{MatchPayload, MatchRecord};
use crate::models::player::{Player, PlayerFieldsUpdate, StatIncrements};

#[derive(Debug, Default)]
struct MemoryState {
    players: Vec<Player>,
    /// Insertion order, oldest first
    matches: Vec<MatchRecord>,
}

impl MemoryState {
    fn player(&self, name: &str) -> Result<&Player, TrackerError> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| TrackerError::player_not_found(name))
    }

    fn player_mut(&mut self, name: &str) -> Result<&mut Player, TrackerError> {
        self.players
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| TrackerError::player_not_found(name))
    }

    fn match_position(&self, id: Uuid) -> Result<usize, TrackerError> {
        self.matches
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| TrackerError::match_not_found(id))
    }

    fn seed(&mut self, roster: &Roster) -> usize {
        let mut created = 0;
        for name in roster.names() {
            if !self.players.iter().any(|p| p.name == name) {
                self.players.push(Player::new(name));
                created += 1;
            }
        }
        created
    }
}

/// In-process store behind a single lock. Used for tests and local demo runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RivalryStore for MemoryStore {
    async fn find_player_by_name(&self, name: &str) -> Result<Player, TrackerError> {
        self.state.read().await.player(name).cloned()
    }

    async fn list_players(&self) -> Result<Vec<Player>, TrackerError> {
        Ok(self.state.read().await.players.clone())
    }

    async fn apply_increment(
        &self,
        name: &str,
        increments: &StatIncrements,
    ) -> Result<Player, TrackerError> {
        let mut state = self.state.write().await;
        let player = state.player_mut(name)?;
        player.apply_increments(increments)?;
        Ok(player.clone())
    }

    async fn replace_fields(
        &self,
        name: &str,
        fields: &PlayerFieldsUpdate,
    ) -> Result<Player, TrackerError> {
        let mut state = self.state.write().await;
        let player = state.player_mut(name)?;
        player.replace_fields(fields);
        Ok(player.clone())
    }

    async fn append_match(&self, payload: &MatchPayload) -> Result<MatchRecord, TrackerError> {
        let record = MatchRecord::from_payload(payload);
        self.state.write().await.matches.push(record.clone());
        Ok(record)
    }

    async fn list_matches(&self) -> Result<Vec<MatchRecord>, TrackerError> {
        let state = self.state.read().await;
        Ok(state.matches.iter().rev().cloned().collect())
    }

    async fn update_match(
        &self,
        id: Uuid,
        payload: &MatchPayload,
    ) -> Result<MatchRecord, TrackerError> {
        let mut state = self.state.write().await;
        let index = state.match_position(id)?;
        let record = &mut state.matches[index];
        record.overwrite_with(payload);
        Ok(record.clone())
    }

    async fn delete_match(&self, id: Uuid) -> Result<(), TrackerError> {
        let mut state = self.state.write().await;
        let index = state.match_position(id)?;
        state.matches.remove(index);
        Ok(())
    }

    async fn apply_match(
        &self,
        roster: &Roster,
        deltas: &MatchDeltas,
        log: LogChange<'_>,
    ) -> Result<AppliedMatch, TrackerError> {
        let mut state = self.state.write().await;

        // Compute everything up front so a failure leaves the state untouched
        let me = state.player(&roster.me)?.with_increments(&deltas.me)?;
        let friend = state.player(&roster.friend)?.with_increments(&deltas.friend)?;
        let removal = match log {
            LogChange::Remove(id) => Some(state.match_position(id)?),
            _ => None,
        };

        *state.player_mut(&roster.me)? = me.clone();
        *state.player_mut(&roster.friend)? = friend.clone();

        let logged = match log {
            LogChange::Append(payload) => {
                let record = MatchRecord::from_payload(payload);
                state.matches.push(record.clone());
                Some(record)
            }
            _ => None,
        };
        if let Some(index) = removal {
            state.matches.remove(index);
        }

        Ok(AppliedMatch { me, friend, logged })
    }

    async fn seed_players(&self, roster: &Roster) -> Result<usize, TrackerError> {
        Ok(self.state.write().await.seed(roster))
    }

    async fn reset(&self, roster: &Roster) -> Result<Vec<Player>, TrackerError> {
        let mut state = self.state.write().await;
        *state = MemoryState::default();
        state.seed(roster);
        Ok(state.players.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::MatchResult;

    fn roster() -> Roster {
        Roster::new("Shakthi", "Shynu").unwrap()
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryStore::new();
        assert_eq!(store.seed_players(&roster()).await.unwrap(), 2);
        assert_eq!(store.seed_players(&roster()).await.unwrap(), 0);
        assert_eq!(store.list_players().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_removal_leaves_players_untouched() {
        let store = MemoryStore::new();
        store.seed_players(&roster()).await.unwrap();

        let deltas = MatchDeltas {
            me: StatIncrements { total_matches: -1, ..Default::default() },
            friend: StatIncrements { total_matches: -1, ..Default::default() },
        };
        let result = store
            .apply_match(&roster(), &deltas, LogChange::Remove(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(TrackerError::NotFound(_))));
        let me = store.find_player_by_name("Shakthi").await.unwrap();
        assert_eq!(me.stats.total_matches, 0);
    }

    #[tokio::test]
    async fn test_missing_player_aborts_whole_match() {
        let store = MemoryStore::new();
        store.seed_players(&roster()).await.unwrap();
        let other = Roster::new("Shakthi", "Stranger").unwrap();
        let payload = MatchPayload::new("2024-05-01", MatchResult::Win);
        let deltas = MatchDeltas {
            me: StatIncrements { total_matches: 1, wins: 1, ..Default::default() },
            friend: StatIncrements { total_matches: 1, losses: 1, ..Default::default() },
        };

        let result = store.apply_match(&other, &deltas, LogChange::Append(&payload)).await;

        assert!(matches!(result, Err(TrackerError::NotFound(_))));
        assert_eq!(store.find_player_by_name("Shakthi").await.unwrap().stats.wins, 0);
        assert!(store.list_matches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overflow_on_one_side_aborts_whole_match() {
        let store = MemoryStore::new();
        store.seed_players(&roster()).await.unwrap();
        store
            .apply_increment("Shynu", &StatIncrements { losses: i32::MAX, ..Default::default() })
            .await
            .unwrap();
        let payload = MatchPayload::new("2024-05-01", MatchResult::Win);
        let deltas = MatchDeltas {
            me: StatIncrements { total_matches: 1, wins: 1, ..Default::default() },
            friend: StatIncrements { total_matches: 1, losses: 1, ..Default::default() },
        };

        let result = store.apply_match(&roster(), &deltas, LogChange::Append(&payload)).await;

        assert!(matches!(result, Err(TrackerError::Validation(_))));
        let me = store.find_player_by_name("Shakthi").await.unwrap();
        assert_eq!(me.stats.total_matches, 0);
        assert_eq!(me.stats.wins, 0);
        let friend = store.find_player_by_name("Shynu").await.unwrap();
        assert_eq!(friend.stats.total_matches, 0);
        assert!(store.list_matches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_match_removes_only_that_entry() {
        let store = MemoryStore::new();
        let kept = store
            .append_match(&MatchPayload::new("2024-05-01", MatchResult::Win))
            .await
            .unwrap();
        let dropped = store
            .append_match(&MatchPayload::new("2024-05-02", MatchResult::Draw))
            .await
            .unwrap();

        store.delete_match(dropped.id).await.unwrap();
        let history = store.list_matches().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, kept.id);

        let again = store.delete_match(dropped.id).await;
        assert!(matches!(again, Err(TrackerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let store = MemoryStore::new();
        let first = store
            .append_match(&MatchPayload::new("2024-05-01", MatchResult::Win))
            .await
            .unwrap();
        let second = store
            .append_match(&MatchPayload::new("2024-05-02", MatchResult::Loss))
            .await
            .unwrap();

        let history = store.list_matches().await.unwrap();
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }
}
