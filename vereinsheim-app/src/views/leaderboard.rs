use std::cmp::Reverse;
use vereinsheim_common::model::user::User;

/// Display treatment for the top three; carries no point value.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum PodiumTier {
    Gold,
    Silver,
    Bronze,
}

/// Leaderboard time frame tabs. Points are all-time totals, so these are
/// display-only for now.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum TimeFrame {
    #[default]
    AllTime,
    ThisWeek,
    ThisMonth,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 3] = [TimeFrame::AllTime, TimeFrame::ThisWeek, TimeFrame::ThisMonth];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimeFrame::AllTime => "All Time",
            TimeFrame::ThisWeek => "This Week",
            TimeFrame::ThisMonth => "This Month",
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct RankedMember<'a> {
    /// 1-based position after sorting.
    pub rank: usize,
    pub tier: Option<PodiumTier>,
    pub user: &'a User,
}

/// Ranks members by points descending. The sort is stable: among equal
/// scores, whoever appeared first in the input ranks higher.
#[must_use]
pub fn rankings(users: &[User]) -> Vec<RankedMember<'_>> {
    let mut sorted: Vec<&User> = users.iter().collect();
    sorted.sort_by_key(|user| Reverse(user.points));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, user)| RankedMember {
            rank: index + 1,
            tier: match index {
                0 => Some(PodiumTier::Gold),
                1 => Some(PodiumTier::Silver),
                2 => Some(PodiumTier::Bronze),
                _ => None,
            },
            user,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcDateTime;
    use vereinsheim_common::model::{Id, user::ActivityLevel};

    fn user(id: u64, name: &str, points: u32) -> User {
        User {
            id: Id::new(id),
            name: name.into(),
            avatar: None,
            bio: String::new(),
            points,
            activity_level: ActivityLevel::Medium,
            join_date: UtcDateTime::now(),
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let users = vec![user(1, "A", 100), user(2, "B", 50), user(3, "C", 100)];

        let ranked = rankings(&users);
        let names: Vec<&str> = ranked.iter().map(|member| member.user.name.as_str()).collect();
        assert_eq!(names, ["A", "C", "B"]);

        let ranks: Vec<usize> = ranked.iter().map(|member| member.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn top_three_get_podium_tiers() {
        let users = vec![
            user(1, "A", 40),
            user(2, "B", 30),
            user(3, "C", 20),
            user(4, "D", 10),
        ];

        let ranked = rankings(&users);
        assert_eq!(ranked[0].tier, Some(PodiumTier::Gold));
        assert_eq!(ranked[1].tier, Some(PodiumTier::Silver));
        assert_eq!(ranked[2].tier, Some(PodiumTier::Bronze));
        assert_eq!(ranked[3].tier, None);
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(rankings(&[]).is_empty());
    }
}
