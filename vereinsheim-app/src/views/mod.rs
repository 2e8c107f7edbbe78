//! Derived aggregators: pure, synchronous transforms from already-fetched
//! collections into view-ready structures. Nothing in here touches a store.

pub mod classroom;
pub mod feed;
pub mod leaderboard;
pub mod search;
