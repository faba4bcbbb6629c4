// src/models/player.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::ops::Neg;
use uuid::Uuid;

use crate::error::TrackerError;

/// Aggregate counters kept for each player of the rivalry
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub total_matches: i32,
    /// Effective goals, including own goals the opponent put in their own net
    pub total_goals: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub penalty_goals: i32,
    pub freekick_goals: i32,
    pub corner_goals: i32,
    pub own_goals: i32,
}

impl PlayerStats {
    /// Counters after adding `inc`, or `None` if any of them leaves the i32 range
    pub fn checked_add(&self, inc: &StatIncrements) -> Option<PlayerStats> {
        Some(PlayerStats {
            total_matches: self.total_matches.checked_add(inc.total_matches)?,
            total_goals: self.total_goals.checked_add(inc.total_goals)?,
            wins: self.wins.checked_add(inc.wins)?,
            draws: self.draws.checked_add(inc.draws)?,
            losses: self.losses.checked_add(inc.losses)?,
            penalty_goals: self.penalty_goals.checked_add(inc.penalty_goals)?,
            freekick_goals: self.freekick_goals.checked_add(inc.freekick_goals)?,
            corner_goals: self.corner_goals.checked_add(inc.corner_goals)?,
            own_goals: self.own_goals.checked_add(inc.own_goals)?,
        })
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    #[sqlx(flatten)]
    pub stats: PlayerStats,
    pub conceded_matches: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            stats: PlayerStats::default(),
            conceded_matches: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// This player with every counter of `inc` added. Nothing is changed on error.
    pub fn with_increments(&self, inc: &StatIncrements) -> Result<Player, TrackerError> {
        let stats = self.stats.checked_add(inc);
        let conceded_matches = self.conceded_matches.checked_add(inc.conceded_matches);
        match (stats, conceded_matches) {
            (Some(stats), Some(conceded_matches)) => Ok(Player {
                stats,
                conceded_matches,
                updated_at: Utc::now(),
                ..self.clone()
            }),
            _ => Err(TrackerError::counter_out_of_range(&self.name)),
        }
    }

    pub fn apply_increments(&mut self, inc: &StatIncrements) -> Result<(), TrackerError> {
        *self = self.with_increments(inc)?;
        Ok(())
    }

    /// Overwrite the counters present in `fields`, leaving the rest untouched
    pub fn replace_fields(&mut self, fields: &PlayerFieldsUpdate) {
        if let Some(patch) = &fields.stats {
            let stats = &mut self.stats;
            stats.total_matches = patch.total_matches.unwrap_or(stats.total_matches);
            stats.total_goals = patch.total_goals.unwrap_or(stats.total_goals);
            stats.wins = patch.wins.unwrap_or(stats.wins);
            stats.draws = patch.draws.unwrap_or(stats.draws);
            stats.losses = patch.losses.unwrap_or(stats.losses);
            stats.penalty_goals = patch.penalty_goals.unwrap_or(stats.penalty_goals);
            stats.freekick_goals = patch.freekick_goals.unwrap_or(stats.freekick_goals);
            stats.corner_goals = patch.corner_goals.unwrap_or(stats.corner_goals);
            stats.own_goals = patch.own_goals.unwrap_or(stats.own_goals);
        }
        if let Some(conceded) = fields.conceded_matches {
            self.conceded_matches = conceded;
        }
        self.updated_at = Utc::now();
    }
}

/// Signed deltas for one player record. Zero means the counter is left as is.
///
/// Keys may be sent either plain (`wins`) or as the dotted document path
/// (`stats.wins`) older clients use.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StatIncrements {
    #[serde(alias = "stats.totalMatches")]
    pub total_matches: i32,
    #[serde(alias = "stats.totalGoals")]
    pub total_goals: i32,
    #[serde(alias = "stats.wins")]
    pub wins: i32,
    #[serde(alias = "stats.draws")]
    pub draws: i32,
    #[serde(alias = "stats.losses")]
    pub losses: i32,
    #[serde(alias = "stats.penaltyGoals")]
    pub penalty_goals: i32,
    #[serde(alias = "stats.freekickGoals")]
    pub freekick_goals: i32,
    #[serde(alias = "stats.cornerGoals")]
    pub corner_goals: i32,
    #[serde(alias = "stats.ownGoals")]
    pub own_goals: i32,
    pub conceded_matches: i32,
}

impl StatIncrements {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Neg for StatIncrements {
    type Output = StatIncrements;

    fn neg(self) -> Self::Output {
        StatIncrements {
            total_matches: -self.total_matches,
            total_goals: -self.total_goals,
            wins: -self.wins,
            draws: -self.draws,
            losses: -self.losses,
            penalty_goals: -self.penalty_goals,
            freekick_goals: -self.freekick_goals,
            corner_goals: -self.corner_goals,
            own_goals: -self.own_goals,
            conceded_matches: -self.conceded_matches,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StatsPatch {
    pub total_matches: Option<i32>,
    pub total_goals: Option<i32>,
    pub wins: Option<i32>,
    pub draws: Option<i32>,
    pub losses: Option<i32>,
    pub penalty_goals: Option<i32>,
    pub freekick_goals: Option<i32>,
    pub corner_goals: Option<i32>,
    pub own_goals: Option<i32>,
}

impl StatsPatch {
    pub fn values(&self) -> [Option<i32>; 9] {
        [
            self.total_matches,
            self.total_goals,
            self.wins,
            self.draws,
            self.losses,
            self.penalty_goals,
            self.freekick_goals,
            self.corner_goals,
            self.own_goals,
        ]
    }
}

/// Direct stat edit: replaces the given counters outright
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PlayerFieldsUpdate {
    pub stats: Option<StatsPatch>,
    pub conceded_matches: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflowing_increment_leaves_player_unchanged() {
        let mut player = Player::new("Shakthi");
        player
            .apply_increments(&StatIncrements { wins: i32::MAX, ..Default::default() })
            .unwrap();
        let before = player.clone();

        let result = player.apply_increments(&StatIncrements {
            total_matches: 5,
            wins: 1,
            ..Default::default()
        });

        assert!(matches!(result, Err(TrackerError::Validation(_))));
        assert_eq!(player, before);
    }
}
