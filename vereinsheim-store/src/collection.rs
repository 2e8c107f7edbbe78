use crate::{Result, StoreError};
use std::time::Duration;
use tokio::{sync::Mutex, time::sleep};
use tracing::debug;
use vereinsheim_common::model::Id;

/// A record type owned by a [`Collection`].
pub(crate) trait Entity: Clone {
    type Marker;
    const NAME: &'static str;

    fn id(&self) -> Id<Self::Marker>;
}

/// Where a newly created record lands in the sequence.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Placement {
    /// Newest-first collections (posts).
    Front,
    Back,
}

/// One entity collection's authoritative state.
///
/// Each operation suspends once for the simulated latency, then runs its
/// scan/mutation as an uninterrupted critical section, so concurrent
/// operations never observe a half-applied mutation. Every value leaving a
/// method is a disconnected clone.
pub(crate) struct Collection<T> {
    state: Mutex<State<T>>,
    latency: Duration,
}

struct State<T> {
    records: Vec<T>,
    /// Id watermark; starts above the highest seeded id and only ever
    /// increments, so ids are never reused after deletion.
    next_id: u64,
}

impl<T: Entity> Collection<T> {
    pub(crate) fn new(seed: Vec<T>, latency: Duration) -> Self {
        let next_id = seed
            .iter()
            .map(|record| record.id().get())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            state: Mutex::new(State {
                records: seed,
                next_id,
            }),
            latency,
        }
    }

    pub(crate) async fn all(&self) -> Vec<T> {
        sleep(self.latency).await;
        self.state.lock().await.records.clone()
    }

    pub(crate) async fn get(&self, id: Id<T::Marker>) -> Result<T> {
        sleep(self.latency).await;
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::NAME, id))
    }

    pub(crate) async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        sleep(self.latency).await;
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub(crate) async fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        sleep(self.latency).await;
        let state = self.state.lock().await;
        state.records.iter().find(|record| predicate(record)).cloned()
    }

    pub(crate) async fn insert(
        &self,
        placement: Placement,
        build: impl FnOnce(Id<T::Marker>) -> T,
    ) -> T {
        sleep(self.latency).await;
        let mut state = self.state.lock().await;

        let id = Id::new(state.next_id);
        state.next_id += 1;

        let record = build(id);
        debug!(entity = T::NAME, %id, "inserting record");
        match placement {
            Placement::Front => state.records.insert(0, record.clone()),
            Placement::Back => state.records.push(record.clone()),
        }
        record
    }

    pub(crate) async fn mutate(
        &self,
        id: Id<T::Marker>,
        mutate: impl FnOnce(&mut T),
    ) -> Result<T> {
        self.try_mutate(id, |record| {
            mutate(record);
            Ok(())
        })
        .await
    }

    /// Like [`Collection::mutate`], but the closure may refuse; the check
    /// and the mutation happen inside the same critical section.
    pub(crate) async fn try_mutate(
        &self,
        id: Id<T::Marker>,
        mutate: impl FnOnce(&mut T) -> Result<()>,
    ) -> Result<T> {
        sleep(self.latency).await;
        let mut state = self.state.lock().await;

        let record = state
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| StoreError::not_found(T::NAME, id))?;

        mutate(record)?;
        debug!(entity = T::NAME, %id, "updated record");
        Ok(record.clone())
    }

    pub(crate) async fn remove(&self, id: Id<T::Marker>) -> Result<T> {
        sleep(self.latency).await;
        let mut state = self.state.lock().await;

        let index = state
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| StoreError::not_found(T::NAME, id))?;

        debug!(entity = T::NAME, %id, "removing record");
        Ok(state.records.remove(index))
    }

    /// Create-or-update inside one critical section. Used for composite-key
    /// upserts where a concurrent create would otherwise race in a
    /// duplicate.
    pub(crate) async fn update_or_insert(
        &self,
        matches: impl Fn(&T) -> bool,
        mutate: impl FnOnce(&mut T),
        build: impl FnOnce(Id<T::Marker>) -> T,
    ) -> T {
        sleep(self.latency).await;
        let mut state = self.state.lock().await;

        if let Some(record) = state.records.iter_mut().find(|record| matches(record)) {
            mutate(record);
            return record.clone();
        }

        let id = Id::new(state.next_id);
        state.next_id += 1;

        let record = build(id);
        debug!(entity = T::NAME, %id, "upsert inserted new record");
        state.records.push(record.clone());
        record
    }
}
