// src/models/match_record.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::common::{MatchResult, Role};

/// The ten goal counters of a match, split by scoring side and goal type.
///
/// Wire names keep the `me_normalGoals` style of the existing web client.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MatchGoals {
    #[serde(rename = "me_normalGoals", deserialize_with = "null_as_zero")]
    pub me_normal_goals: i32,
    #[serde(rename = "me_penaltyGoals", deserialize_with = "null_as_zero")]
    pub me_penalty_goals: i32,
    #[serde(rename = "me_freekickGoals", deserialize_with = "null_as_zero")]
    pub me_freekick_goals: i32,
    #[serde(rename = "me_cornerGoals", deserialize_with = "null_as_zero")]
    pub me_corner_goals: i32,
    #[serde(rename = "me_ownGoals", deserialize_with = "null_as_zero")]
    pub me_own_goals: i32,
    #[serde(rename = "friend_normalGoals", deserialize_with = "null_as_zero")]
    pub friend_normal_goals: i32,
    #[serde(rename = "friend_penaltyGoals", deserialize_with = "null_as_zero")]
    pub friend_penalty_goals: i32,
    #[serde(rename = "friend_freekickGoals", deserialize_with = "null_as_zero")]
    pub friend_freekick_goals: i32,
    #[serde(rename = "friend_cornerGoals", deserialize_with = "null_as_zero")]
    pub friend_corner_goals: i32,
    #[serde(rename = "friend_ownGoals", deserialize_with = "null_as_zero")]
    pub friend_own_goals: i32,
}

/// Older clients send `null` for goal types that did not happen
fn null_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

/// Goals scored by one side, by type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideGoals {
    pub normal: i32,
    pub penalty: i32,
    pub freekick: i32,
    pub corner: i32,
    /// Put into this side's own net, credited to the opponent
    pub own: i32,
}

impl SideGoals {
    /// Goals this side scored past the opponent, excluding own goals.
    /// `None` if the sum does not fit a counter.
    pub fn scored(&self) -> Option<i32> {
        self.normal
            .checked_add(self.penalty)?
            .checked_add(self.freekick)?
            .checked_add(self.corner)
    }
}

impl MatchGoals {
    pub fn side(&self, role: Role) -> SideGoals {
        match role {
            Role::Me => SideGoals {
                normal: self.me_normal_goals,
                penalty: self.me_penalty_goals,
                freekick: self.me_freekick_goals,
                corner: self.me_corner_goals,
                own: self.me_own_goals,
            },
            Role::Friend => SideGoals {
                normal: self.friend_normal_goals,
                penalty: self.friend_penalty_goals,
                freekick: self.friend_freekick_goals,
                corner: self.friend_corner_goals,
                own: self.friend_own_goals,
            },
        }
    }

    /// A side's scored goals plus the own goals its opponent conceded
    pub fn effective_goals(&self, role: Role) -> Option<i32> {
        self.side(role).scored()?.checked_add(self.side(role.opponent()).own)
    }

    pub fn counters(&self) -> [(&'static str, i32); 10] {
        [
            ("me_normalGoals", self.me_normal_goals),
            ("me_penaltyGoals", self.me_penalty_goals),
            ("me_freekickGoals", self.me_freekick_goals),
            ("me_cornerGoals", self.me_corner_goals),
            ("me_ownGoals", self.me_own_goals),
            ("friend_normalGoals", self.friend_normal_goals),
            ("friend_penaltyGoals", self.friend_penalty_goals),
            ("friend_freekickGoals", self.friend_freekick_goals),
            ("friend_cornerGoals", self.friend_corner_goals),
            ("friend_ownGoals", self.friend_own_goals),
        ]
    }
}

/// Match fields as submitted by the client, before an id is assigned
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchPayload {
    pub match_date: String,
    pub result: MatchResult,
    #[serde(flatten)]
    pub goals: MatchGoals,
}

impl MatchPayload {
    pub fn new(match_date: impl Into<String>, result: MatchResult) -> Self {
        Self {
            match_date: match_date.into(),
            result,
            goals: MatchGoals::default(),
        }
    }

    pub fn with_goals(mut self, goals: MatchGoals) -> Self {
        self.goals = goals;
        self
    }
}

/// A match as kept in the history log
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub match_date: String,
    pub result: MatchResult,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub goals: MatchGoals,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn from_payload(payload: &MatchPayload) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            match_date: payload.match_date.clone(),
            result: payload.result,
            goals: payload.goals,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn overwrite_with(&mut self, payload: &MatchPayload) {
        self.match_date = payload.match_date.clone();
        self.result = payload.result;
        self.goals = payload.goals;
        self.updated_at = Utc::now();
    }
}

/// Undo request: the original match fields plus, optionally, the log entry to drop.
///
/// The date is not needed to compute the reversal and is ignored if sent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReverseMatchRequest {
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
    pub result: MatchResult,
    #[serde(flatten)]
    pub goals: MatchGoals,
}
