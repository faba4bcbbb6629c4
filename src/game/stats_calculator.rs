use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::common::{MatchResult, Role};
use crate::models::match_record::MatchGoals;
use crate::models::player::StatIncrements;

/// Whether a match is being applied to the standings or taken back out
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Multiplier {
    Apply,
    Reverse,
}

impl Multiplier {
    pub fn factor(&self) -> i32 {
        match self {
            Multiplier::Apply => 1,
            Multiplier::Reverse => -1,
        }
    }
}

/// Increment sets for both sides of one match
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchDeltas {
    pub me: StatIncrements,
    pub friend: StatIncrements,
}

impl MatchDeltas {
    pub fn for_role(&self, role: Role) -> &StatIncrements {
        match role {
            Role::Me => &self.me,
            Role::Friend => &self.friend,
        }
    }
}

pub struct StatCalculator;

impl StatCalculator {
    /// Translate one match into the counter changes of both players.
    ///
    /// Goal counts are taken as given; negative inputs are not rejected here
    /// and flow straight into the deltas. Sums that do not fit a counter are
    /// a validation error.
    pub fn calculate(
        result: MatchResult,
        goals: &MatchGoals,
        multiplier: Multiplier,
    ) -> Result<MatchDeltas, TrackerError> {
        Ok(MatchDeltas {
            me: Self::side_increments(Role::Me, result, goals, multiplier)?,
            friend: Self::side_increments(Role::Friend, result.inverse(), goals, multiplier)?,
        })
    }

    /// `outcome` is the result from this side's own point of view
    fn side_increments(
        role: Role,
        outcome: MatchResult,
        goals: &MatchGoals,
        multiplier: Multiplier,
    ) -> Result<StatIncrements, TrackerError> {
        let m = multiplier.factor();
        let out_of_range = || TrackerError::Validation(format!("Goal counts for {} are out of range", role));
        let scale = |value: Option<i32>| value.and_then(|v| v.checked_mul(m)).ok_or_else(out_of_range);

        let side = goals.side(role);
        let conceded = goals.effective_goals(role.opponent()).ok_or_else(out_of_range)? > 0;

        let mut inc = StatIncrements {
            total_matches: m,
            total_goals: scale(goals.effective_goals(role))?,
            penalty_goals: scale(Some(side.penalty))?,
            freekick_goals: scale(Some(side.freekick))?,
            corner_goals: scale(Some(side.corner))?,
            own_goals: scale(Some(side.own))?,
            conceded_matches: if conceded { m } else { 0 },
            ..StatIncrements::default()
        };

        match outcome {
            MatchResult::Win => inc.wins = m,
            MatchResult::Draw => inc.draws = m,
            MatchResult::Loss => inc.losses = m,
        }

        Ok(inc)
    }
}
