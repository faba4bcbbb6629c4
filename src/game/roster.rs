use serde::Deserialize;

use crate::error::TrackerError;
use crate::models::common::Role;

/// The two players of the rivalry, bound to their roles
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Roster {
    pub me: String,
    pub friend: String,
}

impl Roster {
    pub fn new(me: impl Into<String>, friend: impl Into<String>) -> Result<Self, TrackerError> {
        let roster = Self {
            me: me.into(),
            friend: friend.into(),
        };
        roster.validate()?;
        Ok(roster)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.me.trim().is_empty() || self.friend.trim().is_empty() {
            return Err(TrackerError::Validation("Roster names cannot be empty".into()));
        }
        if self.me == self.friend {
            return Err(TrackerError::Validation(
                "Roster needs two distinct player names".into(),
            ));
        }
        Ok(())
    }

    pub fn name_for(&self, role: Role) -> &str {
        match role {
            Role::Me => &self.me,
            Role::Friend => &self.friend,
        }
    }

    pub fn names(&self) -> [&str; 2] {
        [&self.me, &self.friend]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_lookup() {
        let roster = Roster::new("Shakthi", "Shynu").unwrap();
        assert_eq!(roster.name_for(Role::Me), "Shakthi");
        assert_eq!(roster.name_for(Role::Friend), "Shynu");
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        assert!(Roster::new("Same", "Same").is_err());
        assert!(Roster::new("", "Other").is_err());
    }
}
