use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::store::{LogChange, RivalryStore};
use crate::error::TrackerError;
use crate::game::match_validator::MatchValidator;
use crate::game::roster::Roster;
use crate::game::stats_calculator::{Multiplier, StatCalculator};
use crate::models::common::Role;
use crate::models::match_record::{MatchPayload, MatchRecord, ReverseMatchRequest};
use crate::models::player::Player;

/// Both players and the new log entry after a submission
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmittedMatch {
    pub me: Player,
    pub friend: Player,
    #[serde(rename = "match")]
    pub match_record: MatchRecord,
}

/// Both players after a reversal
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReversedMatch {
    pub me: Player,
    pub friend: Player,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_match_id: Option<Uuid>,
}

/// Applies, reverses and edits matches against the roster's two players
pub struct MatchService {
    store: Arc<dyn RivalryStore>,
    roster: Roster,
    validator: MatchValidator,
}

impl MatchService {
    pub fn new(store: Arc<dyn RivalryStore>, roster: Roster) -> Self {
        Self {
            store,
            roster,
            validator: MatchValidator::new(),
        }
    }

    /// Log a new match and add it to both players' stats in one unit
    #[tracing::instrument(
        name = "Submit match",
        skip(self, payload),
        fields(result = %payload.result, match_date = %payload.match_date)
    )]
    pub async fn submit_match(&self, payload: &MatchPayload) -> Result<SubmittedMatch, TrackerError> {
        self.validator.validate_payload(payload)?;

        let deltas = StatCalculator::calculate(payload.result, &payload.goals, Multiplier::Apply)?;
        let applied = self
            .store
            .apply_match(&self.roster, &deltas, LogChange::Append(payload))
            .await?;

        // An append always hands back the stored row
        let match_record = applied
            .logged
            .ok_or(TrackerError::Database(sqlx::Error::RowNotFound))?;

        tracing::info!(
            "Recorded match {}: {} {} - {} {}",
            match_record.id,
            self.roster.me,
            deltas.for_role(Role::Me).total_goals,
            deltas.for_role(Role::Friend).total_goals,
            self.roster.friend
        );

        Ok(SubmittedMatch {
            me: applied.me,
            friend: applied.friend,
            match_record,
        })
    }

    /// Take a previously applied match back out of both players' stats.
    ///
    /// When the request names a log entry it is deleted in the same unit; a
    /// missing entry aborts the reversal so a match cannot be undone twice.
    #[tracing::instrument(
        name = "Reverse match",
        skip(self, request),
        fields(result = %request.result, match_id = ?request.match_id)
    )]
    pub async fn reverse_match(&self, request: &ReverseMatchRequest) -> Result<ReversedMatch, TrackerError> {
        self.validator.validate_goals(&request.goals)?;

        let deltas = StatCalculator::calculate(request.result, &request.goals, Multiplier::Reverse)?;
        let log = match request.match_id {
            Some(id) => LogChange::Remove(id),
            None => LogChange::Keep,
        };
        let applied = self.store.apply_match(&self.roster, &deltas, log).await?;

        tracing::info!("Reversed {} match (log entry: {:?})", request.result, request.match_id);

        Ok(ReversedMatch {
            me: applied.me,
            friend: applied.friend,
            removed_match_id: request.match_id,
        })
    }

    /// Overwrite a logged match. Player stats are left alone.
    #[tracing::instrument(name = "Update match", skip(self, payload), fields(match_id = %id))]
    pub async fn update_match(&self, id: Uuid, payload: &MatchPayload) -> Result<MatchRecord, TrackerError> {
        self.validator.validate_payload(payload)?;
        self.store.update_match(id, payload).await
    }

    pub async fn history(&self) -> Result<Vec<MatchRecord>, TrackerError> {
        self.store.list_matches().await
    }
}
