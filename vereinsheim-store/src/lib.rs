//! In-memory entity stores with simulated network latency.
//!
//! Every store is a drop-in stand-in for a future networked repository:
//! operations are async, complete after a bounded delay, and return
//! disconnected copies, so call sites will not need to change when these
//! are replaced by real remote calls.

mod collection;
pub mod courses;
pub mod error;
pub mod fixtures;
pub mod posts;
pub mod progress;
pub mod users;

pub use error::StoreError;
pub use fixtures::FixtureError;

use crate::{
    courses::CourseStore, posts::PostStore, progress::ProgressStore, users::UserStore,
};
use std::time::Duration;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Simulated per-entity latency, overridable for tests and via the
/// environment.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct StoreConfig {
    pub post_latency: Duration,
    pub user_latency: Duration,
    pub course_latency: Duration,
    pub progress_latency: Duration,
}

impl StoreConfig {
    /// Identical latency for every store; `Duration::ZERO` in tests.
    #[must_use]
    pub fn uniform(latency: Duration) -> Self {
        Self {
            post_latency: latency,
            user_latency: latency,
            course_latency: latency,
            progress_latency: latency,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            post_latency: Duration::from_millis(250),
            user_latency: Duration::from_millis(300),
            course_latency: Duration::from_millis(200),
            progress_latency: Duration::from_millis(200),
        }
    }
}

/// The one bundle of authoritative collection state for a process.
///
/// Constructed once and injected into controllers; there are deliberately
/// no module-level store singletons.
pub struct Stores {
    pub posts: PostStore,
    pub users: UserStore,
    pub courses: CourseStore,
    pub progress: ProgressStore,
}

impl Stores {
    /// Seeds every store from the embedded fixtures. The fixtures are
    /// parsed into owned collections, so the fixture data itself is never
    /// mutated.
    pub fn from_fixtures(config: StoreConfig) -> Result<Self, FixtureError> {
        Ok(Self {
            posts: PostStore::new(fixtures::posts()?, config.post_latency),
            users: UserStore::new(fixtures::users()?, config.user_latency),
            courses: CourseStore::new(fixtures::courses()?, config.course_latency),
            progress: ProgressStore::new(fixtures::user_progress()?, config.progress_latency),
        })
    }
}
