use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn new() -> Self {
        GroupId(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GroupId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(GroupId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub roll_number: String,
}

/// A registered group. Serialized with the same field names the browser client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: GroupId,
    pub topic: String,
    #[serde(rename = "groupMembers")]
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn create(proposed: ProposedGroup) -> Self {
        Group {
            id: GroupId::new(),
            topic: proposed.topic,
            members: proposed.members,
            created_at: Utc::now(),
        }
    }

    pub fn has_roll_number(&self, roll_number: &str) -> bool {
        self.members.iter().any(|m| m.roll_number == roll_number)
    }
}

/// Topic and members of a group that has not been admitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedGroup {
    pub topic: String,
    pub members: Vec<Member>,
}
