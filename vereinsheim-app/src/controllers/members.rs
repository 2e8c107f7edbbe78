use crate::views::search;
use std::sync::Arc;
use tracing::debug;
use vereinsheim_common::model::user::User;
use vereinsheim_store::Stores;

#[derive(Clone, Debug, Default)]
pub struct MembersState {
    pub members: Vec<User>,
    pub query: String,
    pub loading: bool,
}

/// Member directory: load once, filter locally as the query changes.
pub struct MembersController {
    stores: Arc<Stores>,
    generation: u64,
    pub state: MembersState,
}

impl MembersController {
    #[must_use]
    pub fn new(stores: Arc<Stores>) -> Self {
        MembersController {
            stores,
            generation: 0,
            state: MembersState::default(),
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
            debug!(generation, current = self.generation, "discarding stale member load");
            return false;
        }
        self.state.members = members;
        self.state.loading = false;
        true
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn set_query(&mut self, query: &str) {
        query.clone_into(&mut self.state.query);
    }

    /// Members matching the current query, in store order.
    #[must_use]
    pub fn visible_members(&self) -> Vec<&User> {
        search::filter_members(&self.state.members, &self.state.query)
    }
}
