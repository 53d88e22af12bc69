//! Activities and their rosters.

use crate::domain::Email;

/// An activity as stored, together with its current roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Unique, immutable activity name.
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Registered emails in registration order.
    pub participants: Vec<Email>,
}

/// Definition of an activity to be created, without a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
}

impl NewActivity {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
        }
    }
}
