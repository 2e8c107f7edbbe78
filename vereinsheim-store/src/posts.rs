use crate::{
    Result,
    collection::{Collection, Entity, Placement},
};
use std::time::Duration;
use time::UtcDateTime;
use vereinsheim_common::model::{
    Id,
    post::{Comment, CommentDraft, Post, PostCategory, PostDraft, PostMarker, PostPatch},
    user::UserMarker,
};

impl Entity for Post {
    type Marker = PostMarker;
    const NAME: &'static str = "Post";

    fn id(&self) -> Id<PostMarker> {
        self.id
    }
}

pub struct PostStore {
    collection: Collection<Post>,
}

impl PostStore {
    #[must_use]
    pub fn new(seed: Vec<Post>, latency: Duration) -> Self {
        Self {
            collection: Collection::new(seed, latency),
        }
    }

    pub async fn get_all(&self) -> Vec<Post> {
        self.collection.all().await
    }

    pub async fn get_by_id(&self, id: Id<PostMarker>) -> Result<Post> {
        self.collection.get(id).await
    }

    /// New posts go to the front: the feed is newest-first.
    pub async fn create(&self, draft: PostDraft) -> Post {
        self.collection
            .insert(Placement::Front, |id| Post {
                id,
                title: draft.title,
                content: draft.content,
                category: draft.category,
                author_id: draft.author_id,
                timestamp: UtcDateTime::now(),
                likes: 0,
                comments: Vec::new(),
            })
            .await
    }

    pub async fn update(&self, id: Id<PostMarker>, patch: PostPatch) -> Result<Post> {
        self.collection.mutate(id, |post| patch.apply(post)).await
    }

    pub async fn delete(&self, id: Id<PostMarker>) -> Result<Post> {
        self.collection.remove(id).await
    }

    pub async fn get_by_category(&self, category: PostCategory) -> Vec<Post> {
        self.collection
            .filter(|post| post.category == category)
            .await
    }

    pub async fn get_by_author(&self, author_id: Id<UserMarker>) -> Vec<Post> {
        self.collection
            .filter(|post| post.author_id == author_id)
            .await
    }

    /// Case-insensitive substring match over title and content.
    pub async fn search(&self, query: &str) -> Vec<Post> {
        let needle = query.to_lowercase();
        self.collection
            .filter(|post| {
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            })
            .await
    }

    pub async fn like(&self, id: Id<PostMarker>) -> Result<Post> {
        self.collection.mutate(id, |post| post.likes += 1).await
    }

    /// Floored at zero; unliking an unliked post is a no-op.
    pub async fn unlike(&self, id: Id<PostMarker>) -> Result<Post> {
        self.collection
            .mutate(id, |post| post.likes = post.likes.saturating_sub(1))
            .await
    }

    /// Appends a timestamped comment with a post-locally-unique id.
    pub async fn add_comment(&self, id: Id<PostMarker>, draft: CommentDraft) -> Result<Post> {
        self.collection
            .mutate(id, |post| {
                let comment_id = post
                    .comments
                    .iter()
                    .map(|comment| comment.id.get())
                    .max()
                    .unwrap_or(0)
                    + 1;
                post.comments.push(Comment {
                    id: Id::new(comment_id),
                    content: draft.content,
                    author_id: draft.author_id,
                    timestamp: UtcDateTime::now(),
                });
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    fn seed_post(id: u64, category: PostCategory, likes: u32) -> Post {
        Post {
            id: Id::new(id),
            title: format!("Post {id}"),
            content: "Some **content** here".into(),
            category,
            author_id: Id::new(1),
            timestamp: UtcDateTime::now(),
            likes,
            comments: Vec::new(),
        }
    }

    fn store() -> PostStore {
        PostStore::new(
            vec![
                seed_post(1, PostCategory::Announcements, 4),
                seed_post(2, PostCategory::Questions, 0),
            ],
            Duration::ZERO,
        )
    }

    fn draft() -> PostDraft {
        PostDraft {
            title: "Hello".into(),
            content: "World".into(),
            category: PostCategory::Discussions,
            author_id: Id::new(1),
        }
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_defaults() {
        let store = store();
        let before = UtcDateTime::now();

        let post = store.create(draft()).await;

        assert_eq!(post.id, Id::new(3));
        assert_eq!(post.likes, 0);
        assert!(post.comments.is_empty());
        assert!(post.timestamp >= before);

        let fetched = store.get_by_id(post.id).await.unwrap();
        assert_eq!(fetched, post);
    }

    #[tokio::test]
    async fn created_post_is_at_the_front() {
        let store = store();
        let post = store.create(draft()).await;

        let all = store.get_all().await;
        assert_eq!(all.first(), Some(&post));
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_deleting_the_max() {
        let store = store();
        let deleted = store.delete(Id::new(2)).await.unwrap();
        assert_eq!(deleted.id, Id::new(2));

        let post = store.create(draft()).await;
        assert_eq!(post.id, Id::new(3));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = store();
        let before = store.get_by_id(Id::new(1)).await.unwrap();

        let deleted = store.delete(Id::new(1)).await.unwrap();
        assert_eq!(deleted, before);

        assert_eq!(
            store.get_by_id(Id::new(1)).await,
            Err(StoreError::NotFound {
                entity: "Post",
                id: 1
            })
        );
    }

    #[tokio::test]
    async fn get_all_returns_disconnected_copies() {
        let store = store();

        let mut first = store.get_all().await;
        let second = store.get_all().await;
        assert_eq!(first, second);

        first[0].title = "mutated".into();
        first[0].likes = 999;

        assert_eq!(store.get_all().await, second);
    }

    #[tokio::test]
    async fn unlike_floors_at_zero() {
        let store = store();

        let post = store.unlike(Id::new(2)).await.unwrap();
        assert_eq!(post.likes, 0);

        let liked = store.like(Id::new(2)).await.unwrap();
        assert_eq!(liked.likes, 1);
    }

    #[tokio::test]
    async fn comments_get_locally_unique_ids() {
        let store = store();
        let comment = |content: &str| CommentDraft {
            content: content.into(),
            author_id: Id::new(2),
        };

        let post = store.add_comment(Id::new(1), comment("first")).await.unwrap();
        assert_eq!(post.comments[0].id, Id::new(1));

        let post = store.add_comment(Id::new(1), comment("second")).await.unwrap();
        assert_eq!(post.comments[1].id, Id::new(2));
        assert_eq!(post.comments[1].content, "second");
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let store = store();

        let matches = store.search("POST 1").await;
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, Id::new(1));

        let matches = store.search("CONTENT").await;
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn category_and_author_filters() {
        let store = store();

        let announcements = store.get_by_category(PostCategory::Announcements).await;
        assert_eq!(announcements.len(), 1);

        let by_author = store.get_by_author(Id::new(1)).await;
        assert_eq!(by_author.len(), 2);

        let none = store.get_by_author(Id::new(99)).await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let store = store();

        let patch = PostPatch {
            title: Some("Renamed".into()),
            ..PostPatch::default()
        };
        let updated = store.update(Id::new(1), patch).await.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.likes, 4);

        assert!(
            store
                .update(Id::new(42), PostPatch::default())
                .await
                .is_err()
        );
    }
}
