use crate::error::TrackerError;
use crate::models::match_record::{MatchGoals, MatchPayload};
use crate::models::player::PlayerFieldsUpdate;

/// Highest count accepted for a single goal type in one match
pub const MAX_GOALS_PER_TYPE: i32 = 999;

/// Width of the `match_date` column
pub const MAX_MATCH_DATE_LEN: usize = 64;

/// Boundary checks applied before a payload reaches the stat calculator
pub struct MatchValidator;

impl MatchValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a match that is about to be logged
    pub fn validate_payload(&self, payload: &MatchPayload) -> Result<(), TrackerError> {
        self.validate_match_date(&payload.match_date)?;
        self.validate_goals(&payload.goals)
    }

    pub fn validate_match_date(&self, match_date: &str) -> Result<(), TrackerError> {
        if match_date.trim().is_empty() {
            return Err(TrackerError::Validation("matchDate is required".into()));
        }
        if match_date.chars().count() > MAX_MATCH_DATE_LEN {
            return Err(TrackerError::Validation(format!(
                "matchDate cannot be longer than {} characters",
                MAX_MATCH_DATE_LEN
            )));
        }
        Ok(())
    }

    pub fn validate_goals(&self, goals: &MatchGoals) -> Result<(), TrackerError> {
        if let Some((field, value)) = goals.counters().into_iter().find(|(_, v)| *v < 0) {
            return Err(TrackerError::Validation(format!(
                "{} cannot be negative (got {})",
                field, value
            )));
        }
        if let Some((field, value)) = goals
            .counters()
            .into_iter()
            .find(|(_, v)| *v > MAX_GOALS_PER_TYPE)
        {
            return Err(TrackerError::Validation(format!(
                "{} cannot exceed {} (got {})",
                field, MAX_GOALS_PER_TYPE, value
            )));
        }
        Ok(())
    }

    /// Replacement values for a player must stay non-negative
    pub fn validate_fields_update(&self, fields: &PlayerFieldsUpdate) -> Result<(), TrackerError> {
        let stats_negative = fields
            .stats
            .map(|patch| patch.values().iter().flatten().any(|v| *v < 0))
            .unwrap_or(false);
        let conceded_negative = fields.conceded_matches.map(|v| v < 0).unwrap_or(false);

        if stats_negative || conceded_negative {
            return Err(TrackerError::Validation("Player counters cannot be negative".into()));
        }
        Ok(())
    }
}

impl Default for MatchValidator {
    fn default() -> Self {
        Self::new()
    }
}
