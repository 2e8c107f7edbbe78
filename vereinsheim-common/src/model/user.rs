use crate::model::Id;
use serde::{Deserialize, Serialize};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

/// Coarse engagement bucket shown on member cards and the leaderboard.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl ActivityLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::High => "High",
            ActivityLevel::Medium => "Medium",
            ActivityLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: String,
    /// Non-negative engagement score, adjusted by community actions.
    pub points: u32,
    pub activity_level: ActivityLevel,
    #[serde(with = "crate::model::rfc3339")]
    pub join_date: UtcDateTime,
}

/// Caller-supplied fields for a new member; the store assigns the id, the
/// join date, zero points, and a Low activity level.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UserDraft {
    pub name: String,
    pub avatar: Option<String>,
    pub bio: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub activity_level: Option<ActivityLevel>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(bio) = self.bio {
            user.bio = bio;
        }
        if let Some(activity_level) = self.activity_level {
            user.activity_level = activity_level;
        }
    }
}
