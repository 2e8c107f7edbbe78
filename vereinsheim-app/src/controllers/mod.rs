//! Page-level controllers: fetch-on-mount, UI state, and the
//! optimistic-update contract. Store failures stop here. They are logged,
//! announced through the notifier, and answered with a full reload; nothing
//! propagates into rendering.

mod classroom;
mod feed;
mod guidelines;
mod leaderboard;
mod members;

pub use classroom::{ClassroomController, LessonStep};
pub use feed::FeedController;
pub use guidelines::GuidelinesController;
pub use leaderboard::LeaderboardController;
pub use members::MembersController;

/// Tag for one in-flight optimistic mutation. On failure the local patch is
/// discarded by this id and replaced with an authoritative reload, never
/// merged.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct CorrelationId(u64);

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub(crate) struct Correlations(u64);

impl Correlations {
    pub(crate) fn next(&mut self) -> CorrelationId {
        self.0 += 1;
        CorrelationId(self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        controllers::{ClassroomController, FeedController, LeaderboardController, MembersController},
        notify::testing::RecordingNotifier,
        views::feed::FeedTab,
    };
    use std::{sync::Arc, time::Duration};
    use vereinsheim_common::model::{Id, post::PostCategory};
    use vereinsheim_store::{StoreConfig, Stores};

    fn stores() -> Arc<Stores> {
        Arc::new(
            Stores::from_fixtures(StoreConfig::uniform(Duration::ZERO))
                .expect("fixtures parse"),
        )
    }

    /// A whole session against the seeded stores: every page loads, a post
    /// is created and liked, a lesson is completed.
    #[tokio::test]
    async fn full_session_walkthrough() {
        let stores = stores();
        let notifier = Arc::new(RecordingNotifier::default());
        let session_user = Id::new(1);

        let mut feed = FeedController::new(
            Arc::clone(&stores),
            notifier.clone(),
            session_user,
        );
        feed.load().await;
        assert!(feed.state.error.is_none());
        let post_count = feed.state.posts.len();
        assert!(post_count > 0);

        feed.create_post(
            "Hello".into(),
            "World".into(),
            PostCategory::Discussions,
        )
        .await;
        assert_eq!(feed.state.posts.len(), post_count + 1);
        assert_eq!(feed.state.posts[0].title, "Hello");
        assert_eq!(feed.state.posts[0].likes, 0);
        assert!(feed.state.posts[0].comments.is_empty());

        let new_post = feed.state.posts[0].id;
        feed.toggle_like(new_post).await;
        assert_eq!(feed.state.posts[0].likes, 1);
        feed.set_tab(FeedTab::Category(PostCategory::Discussions));
        assert!(
            feed.visible_posts()
                .iter()
                .any(|entry| entry.post.id == new_post)
        );

        let mut members = MembersController::new(Arc::clone(&stores));
        members.load().await;
        members.set_query("developer");
        assert!(!members.visible_members().is_empty());

        let mut classroom = ClassroomController::new(
            Arc::clone(&stores),
            notifier.clone(),
            session_user,
        );
        classroom.load().await;
        classroom.select_course(Id::new(1));
        let (_, lesson) = classroom.selected_lesson().expect("a lesson is selected");
        assert!(!lesson.completed);
        let lesson_id = lesson.id;
        classroom.complete_lesson(Id::new(1), lesson_id).await;
        let course = classroom
            .state
            .courses
            .iter()
            .find(|course| course.id == Id::new(1))
            .unwrap();
        assert!(
            course
                .lessons
                .iter()
                .find(|lesson| lesson.id == lesson_id)
                .unwrap()
                .completed
        );

        let mut leaderboard = LeaderboardController::new(Arc::clone(&stores));
        leaderboard.load().await;
        let rankings = leaderboard.rankings();
        assert_eq!(rankings.first().map(|member| member.rank), Some(1));

        // The session's engagement actions showed up as announcements.
        assert!(!notifier.successes.lock().unwrap().is_empty());
        assert!(notifier.errors.lock().unwrap().is_empty());
    }
}
