use crate::{
    Result,
    collection::{Collection, Entity, Placement},
};
use std::{cmp::Reverse, time::Duration};
use time::UtcDateTime;
use vereinsheim_common::model::{
    Id,
    user::{ActivityLevel, User, UserDraft, UserMarker, UserPatch},
};

impl Entity for User {
    type Marker = UserMarker;
    const NAME: &'static str = "User";

    fn id(&self) -> Id<UserMarker> {
        self.id
    }
}

pub struct UserStore {
    collection: Collection<User>,
}

impl UserStore {
    #[must_use]
    pub fn new(seed: Vec<User>, latency: Duration) -> Self {
        Self {
            collection: Collection::new(seed, latency),
        }
    }

    pub async fn get_all(&self) -> Vec<User> {
        self.collection.all().await
    }

    pub async fn get_by_id(&self, id: Id<UserMarker>) -> Result<User> {
        self.collection.get(id).await
    }

    pub async fn create(&self, draft: UserDraft) -> User {
        self.collection
            .insert(Placement::Back, |id| User {
                id,
                name: draft.name,
                avatar: draft.avatar,
                bio: draft.bio,
                points: 0,
                activity_level: ActivityLevel::Low,
                join_date: UtcDateTime::now(),
            })
            .await
    }

    pub async fn update(&self, id: Id<UserMarker>, patch: UserPatch) -> Result<User> {
        self.collection.mutate(id, |user| patch.apply(user)).await
    }

    pub async fn delete(&self, id: Id<UserMarker>) -> Result<User> {
        self.collection.remove(id).await
    }

    /// Adjusts the engagement score; points never drop below zero.
    pub async fn add_points(&self, id: Id<UserMarker>, delta: i32) -> Result<User> {
        self.collection
            .mutate(id, |user| {
                user.points = user.points.saturating_add_signed(delta);
            })
            .await
    }

    /// The `limit` highest-scoring members, points descending, stable for
    /// ties. Sorts a copy; the store's own order is left untouched.
    pub async fn top_users(&self, limit: usize) -> Vec<User> {
        let mut users = self.collection.all().await;
        users.sort_by_key(|user| Reverse(user.points));
        users.truncate(limit);
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_user(id: u64, name: &str, points: u32) -> User {
        User {
            id: Id::new(id),
            name: name.into(),
            avatar: None,
            bio: "Learner".into(),
            points,
            activity_level: ActivityLevel::Medium,
            join_date: UtcDateTime::now(),
        }
    }

    fn store() -> UserStore {
        UserStore::new(
            vec![
                seed_user(1, "Ada", 100),
                seed_user(2, "Ben", 50),
                seed_user(3, "Cleo", 100),
            ],
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn create_applies_member_defaults() {
        let store = store();
        let user = store
            .create(UserDraft {
                name: "Dana".into(),
                avatar: None,
                bio: String::new(),
            })
            .await;

        assert_eq!(user.id, Id::new(4));
        assert_eq!(user.points, 0);
        assert_eq!(user.activity_level, ActivityLevel::Low);
    }

    #[tokio::test]
    async fn points_never_drop_below_zero() {
        let store = store();

        let user = store.add_points(Id::new(2), -80).await.unwrap();
        assert_eq!(user.points, 0);

        let user = store.add_points(Id::new(2), 5).await.unwrap();
        assert_eq!(user.points, 5);
    }

    #[tokio::test]
    async fn top_users_is_stable_and_does_not_reorder_the_store() {
        let store = store();

        let top = store.top_users(2).await;
        assert_eq!(top[0].name, "Ada");
        assert_eq!(top[1].name, "Cleo");

        let all = store.get_all().await;
        let names: Vec<&str> = all.iter().map(|user| user.name.as_str()).collect();
        assert_eq!(names, ["Ada", "Ben", "Cleo"]);
    }
}
