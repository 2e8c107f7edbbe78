use crate::views::leaderboard::{self, RankedMember, TimeFrame};
use std::sync::Arc;
use tracing::debug;
use vereinsheim_common::model::user::User;
use vereinsheim_store::Stores;

#[derive(Clone, Debug, Default)]
pub struct LeaderboardState {
    pub members: Vec<User>,
    pub time_frame: TimeFrame,
    pub loading: bool,
}

pub struct LeaderboardController {
    stores: Arc<Stores>,
    generation: u64,
    pub state: LeaderboardState,
}

impl LeaderboardController {
    #[must_use]
    pub fn new(stores: Arc<Stores>) -> Self {
        LeaderboardController {
            stores,
            generation: 0,
            state: LeaderboardState::default(),
        }
    }

    pub async fn load(&mut self) {
        let generation = self.begin_load();
        let members = self.stores.users.get_all().await;
        self.apply_load(generation, members);
    }

    pub(crate) fn begin_load(&mut self) -> u64 {
        self.state.loading = true;
        self.generation += 1;
        self.generation
    }

    pub(crate) fn apply_load(&mut self, generation: u64, members: Vec<User>) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale leaderboard load");
            return false;
        }
        self.state.members = members;
        self.state.loading = false;
        true
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// All points are all-time totals, so the frame only changes the header.
    pub fn set_time_frame(&mut self, time_frame: TimeFrame) {
        self.state.time_frame = time_frame;
    }

    #[must_use]
    pub fn rankings(&self) -> Vec<RankedMember<'_>> {
        leaderboard::rankings(&self.state.members)
    }
}
