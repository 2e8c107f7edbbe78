pub mod course;
pub mod post;
pub mod progress;
pub mod user;

use derive_where::derive_where;
use std::{fmt::Display, marker::PhantomData};

/// Typed entity id.
///
/// Ids are assigned exclusively by the owning store: a per-collection
/// watermark that starts above the highest seeded id and only ever
/// increments, so ids are never reused after deletion.
#[derive_where(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Id<Marker>(u64, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(inner: u64) -> Self {
        Self(inner, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

/// RFC 3339 (de)serialization for [`time::UtcDateTime`] fields.
///
/// `time::serde::rfc3339` is written against `OffsetDateTime`; this shim
/// converts at the boundary so fixture timestamps stay human-readable.
pub mod rfc3339 {
    use serde::{Deserializer, Serializer};
    use time::{OffsetDateTime, UtcDateTime};

    pub fn serialize<S>(datetime: &UtcDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time::serde::rfc3339::serialize(&OffsetDateTime::from(*datetime), serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<UtcDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        time::serde::rfc3339::deserialize(deserializer).map(UtcDateTime::from)
    }
}
