use crate::{
    controllers::{CorrelationId, Correlations},
    notify::Notify,
    views::{
        feed::{self, FeedEntry, FeedTab},
        search,
    },
};
use std::{collections::HashSet, sync::Arc};
use time::UtcDateTime;
use tracing::{debug, warn};
use vereinsheim_common::{
    model::{
        Id,
        post::{Comment, CommentDraft, Post, PostCategory, PostDraft, PostMarker},
        user::{User, UserMarker},
    },
    points,
};
use vereinsheim_store::Stores;

/// Everything the feed page renders from.
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
    pub active_tab: FeedTab,
    pub query: String,
    /// Posts the session user has liked, for toggling.
    pub liked: HashSet<Id<PostMarker>>,
    pub loading: bool,
    pub error: Option<String>,
    pending: Vec<CorrelationId>,
}

pub struct FeedController {
    stores: Arc<Stores>,
    notifier: Arc<dyn Notify>,
    session_user: Id<UserMarker>,
    correlations: Correlations,
    generation: u64,
    pub state: FeedState,
}

impl FeedController {
    #[must_use]
    pub fn new(
        stores: Arc<Stores>,
        notifier: Arc<dyn Notify>,
        session_user: Id<UserMarker>,
    ) -> Self {
        FeedController {
            stores,
            notifier,
            session_user,
            correlations: Correlations::default(),
            generation: 0,
            state: FeedState::default(),
        }
    }

    pub async fn load(&mut self) {
        let generation = self.begin_load();
        let (posts, users) =
            tokio::join!(self.stores.posts.get_all(), self.stores.users.get_all());
        self.apply_load(generation, posts, users);
    }

    /// Bumps the load generation; a later [`Self::apply_load`] with an older
    /// ticket is discarded.
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.state.loading = true;
        self.state.error = None;
        self.generation += 1;
        self.generation
    }

    /// Returns whether the snapshot was applied.
    pub(crate) fn apply_load(
        &mut self,
        generation: u64,
        posts: Vec<Post>,
        users: Vec<User>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale feed load");
            return false;
        }
        self.state.posts = posts;
        self.state.users = users;
        self.state.loading = false;
        true
    }

    /// Invalidates any load still in flight, as on page unmount.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn set_tab(&mut self, tab: FeedTab) {
        self.state.active_tab = tab;
    }

    pub fn set_query(&mut self, query: &str) {
        query.clone_into(&mut self.state.query);
    }

    /// Posts under the active tab and query, newest first.
    #[must_use]
    pub fn visible_posts(&self) -> Vec<FeedEntry<'_>> {
        let mut entries =
            feed::feed_entries(&self.state.posts, &self.state.users, self.state.active_tab);
        entries.retain(|entry| search::post_matches(entry.post, &self.state.query));
        entries
    }

    #[must_use]
    pub fn tab_counts(&self) -> Vec<(FeedTab, usize)> {
        feed::tab_counts(&self.state.posts)
    }

    #[must_use]
    pub fn pending_mutations(&self) -> usize {
        self.state.pending.len()
    }

    /// Validates locally, then creates and prepends the stored post.
    pub async fn create_post(&mut self, title: String, content: String, category: PostCategory) {
        let draft = PostDraft {
            title,
            content,
            category,
            author_id: self.session_user,
        };
        if let Err(error) = draft.validate() {
            self.notifier.error(&error.to_string());
            return;
        }

        let post = self.stores.posts.create(draft).await;
        self.state.posts.insert(0, post);
        self.award_points(
            points::CREATE_POST,
            &format!("Post created! +{} points", points::CREATE_POST),
        )
        .await;
    }

    /// Optimistically flips the like state, then confirms with the store.
    /// A failed confirmation discards the local patch and reloads.
    pub async fn toggle_like(&mut self, post_id: Id<PostMarker>) {
        let Some(index) = self.state.posts.iter().position(|post| post.id == post_id) else {
            return;
        };
        let unliking = self.state.liked.contains(&post_id);
        let correlation = self.correlations.next();

        {
            let post = &mut self.state.posts[index];
            if unliking {
                post.likes = post.likes.saturating_sub(1);
                self.state.liked.remove(&post_id);
            } else {
                post.likes += 1;
                self.state.liked.insert(post_id);
            }
        }
        self.state.pending.push(correlation);

        let result = if unliking {
            self.stores.posts.unlike(post_id).await
        } else {
            self.stores.posts.like(post_id).await
        };
        match result {
            Ok(post) => {
                self.settle(correlation);
                self.replace_post(post);
                if !unliking {
                    self.award_points(
                        points::LIKE_POST,
                        &format!("+{} points for liking a post!", points::LIKE_POST),
                    )
                    .await;
                }
            }
            Err(error) => {
                warn!(%error, %post_id, "like failed, reloading feed");
                self.notifier.error("Could not update the like. Refreshing the feed.");
                self.state.liked.remove(&post_id);
                self.discard_and_reload(correlation).await;
            }
        }
    }

    /// Appends the comment locally right away, then confirms with the store.
    pub async fn submit_comment(&mut self, post_id: Id<PostMarker>, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            self.notifier.error("A comment needs some text.");
            return;
        }
        let Some(index) = self.state.posts.iter().position(|post| post.id == post_id) else {
            return;
        };
        let correlation = self.correlations.next();

        {
            let post = &mut self.state.posts[index];
            let provisional_id = post
                .comments
                .iter()
                .map(|comment| comment.id.get())
                .max()
                .map_or(1, |max| max + 1);
            post.comments.push(Comment {
                id: Id::new(provisional_id),
                content: content.to_owned(),
                author_id: self.session_user,
                timestamp: UtcDateTime::now(),
            });
        }
        self.state.pending.push(correlation);

        let draft = CommentDraft {
            content: content.to_owned(),
            author_id: self.session_user,
        };
        match self.stores.posts.add_comment(post_id, draft).await {
            Ok(post) => {
                self.settle(correlation);
                self.replace_post(post);
                self.award_points(
                    points::COMMENT_ON_POST,
                    &format!("+{} points for commenting!", points::COMMENT_ON_POST),
                )
                .await;
            }
            Err(error) => {
                warn!(%error, %post_id, "comment failed, reloading feed");
                self.notifier.error("Could not post the comment. Refreshing the feed.");
                self.discard_and_reload(correlation).await;
            }
        }
    }

    fn settle(&mut self, correlation: CorrelationId) {
        self.state.pending.retain(|&pending| pending != correlation);
    }

    fn replace_post(&mut self, post: Post) {
        if let Some(slot) = self.state.posts.iter_mut().find(|slot| slot.id == post.id) {
            *slot = post;
        }
    }

    async fn discard_and_reload(&mut self, correlation: CorrelationId) {
        self.settle(correlation);
        self.load().await;
    }

    /// Points are an independent follow-up call: a failure here is logged
    /// and swallowed, it never rolls back the action that earned them.
    async fn award_points(&mut self, amount: u32, message: &str) {
        #[allow(clippy::cast_possible_wrap)]
        match self.stores.users.add_points(self.session_user, amount as i32).await {
            Ok(user) => {
                self.notifier.success(message);
                if let Some(slot) = self
                    .state
                    .users
                    .iter_mut()
                    .find(|slot| slot.id == user.id)
                {
                    *slot = user;
                }
            }
            Err(error) => warn!(%error, "points award failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use std::time::Duration;
    use vereinsheim_store::StoreConfig;

    fn controller() -> (FeedController, Arc<RecordingNotifier>) {
        let stores = Arc::new(
            Stores::from_fixtures(StoreConfig::uniform(Duration::ZERO))
                .expect("fixtures parse"),
        );
        let notifier = Arc::new(RecordingNotifier::default());
        (
            FeedController::new(stores, notifier.clone(), Id::new(1)),
            notifier,
        )
    }

    #[tokio::test]
    async fn blank_draft_is_rejected_before_any_store_call() {
        let (mut feed, notifier) = controller();
        feed.load().await;
        let before = feed.state.posts.len();

        feed.create_post("   ".into(), "body".into(), PostCategory::Questions)
            .await;

        assert_eq!(feed.state.posts.len(), before);
        assert_eq!(
            notifier.errors.lock().unwrap().as_slice(),
            ["A post needs a title."]
        );
    }

    #[tokio::test]
    async fn like_then_unlike_round_trips() {
        let (mut feed, _notifier) = controller();
        feed.load().await;
        let post_id = feed.state.posts[0].id;
        let likes = feed.state.posts[0].likes;

        feed.toggle_like(post_id).await;
        assert_eq!(feed.state.posts[0].likes, likes + 1);
        assert!(feed.state.liked.contains(&post_id));
        assert_eq!(feed.pending_mutations(), 0);

        feed.toggle_like(post_id).await;
        assert_eq!(feed.state.posts[0].likes, likes);
        assert!(!feed.state.liked.contains(&post_id));
    }

    #[tokio::test]
    async fn failed_like_discards_the_patch_and_reloads() {
        let (mut feed, notifier) = controller();
        feed.load().await;
        let post_id = feed.state.posts[0].id;
        let count = feed.state.posts.len();

        // The post vanishes behind the controller's back.
        feed.stores.posts.delete(post_id).await.unwrap();

        feed.toggle_like(post_id).await;

        // The optimistic bump is gone along with the post itself.
        assert_eq!(feed.state.posts.len(), count - 1);
        assert!(!feed.state.posts.iter().any(|post| post.id == post_id));
        assert!(!feed.state.liked.contains(&post_id));
        assert_eq!(feed.pending_mutations(), 0);
        assert_eq!(notifier.errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stale_load_is_discarded() {
        let (mut feed, _notifier) = controller();
        feed.load().await;
        let posts = feed.state.posts.clone();

        let stale = feed.begin_load();
        feed.invalidate();
        assert!(!feed.apply_load(stale, Vec::new(), Vec::new()));
        assert_eq!(feed.state.posts, posts);
    }

    #[tokio::test]
    async fn commenting_awards_points() {
        let (mut feed, notifier) = controller();
        feed.load().await;
        let post_id = feed.state.posts[0].id;
        let user_points = feed.stores.users.get_by_id(Id::new(1)).await.unwrap().points;

        feed.submit_comment(post_id, "Nice one!").await;

        let post = feed.stores.posts.get_by_id(post_id).await.unwrap();
        assert_eq!(post.comments.last().unwrap().content, "Nice one!");
        assert_eq!(
            feed.stores.users.get_by_id(Id::new(1)).await.unwrap().points,
            user_points + points::COMMENT_ON_POST,
        );
        assert_eq!(notifier.successes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn query_narrows_the_feed() {
        let (mut feed, _notifier) = controller();
        feed.load().await;
        let all = feed.visible_posts().len();

        feed.set_query("zzz nothing matches this");
        assert!(feed.visible_posts().is_empty());

        feed.set_query("");
        assert_eq!(feed.visible_posts().len(), all);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let (mut feed, notifier) = controller();
        feed.load().await;
        let post_id = feed.state.posts[0].id;
        let comments = feed.state.posts[0].comments.len();

        feed.submit_comment(post_id, "   ").await;

        assert_eq!(feed.state.posts[0].comments.len(), comments);
        assert_eq!(notifier.errors.lock().unwrap().len(), 1);
    }
}
