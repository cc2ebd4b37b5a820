use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Full mapping of activity name to activity, replaced wholesale on every
/// fetch. `BTreeMap` keeps card rendering in a stable alphabetical order.
pub type Roster = BTreeMap<String, Activity>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Registration order as returned by the server.
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity. Signed: the server owns capacity enforcement,
    /// and an over-filled activity should render its real (negative) count.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}
