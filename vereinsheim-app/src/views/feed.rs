use std::cmp::Reverse;
use vereinsheim_common::model::{
    post::{Post, PostCategory},
    user::User,
};

/// Active feed filter tab.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum FeedTab {
    #[default]
    All,
    Category(PostCategory),
}

impl FeedTab {
    pub const ALL: [FeedTab; 4] = [
        FeedTab::All,
        FeedTab::Category(PostCategory::Announcements),
        FeedTab::Category(PostCategory::Questions),
        FeedTab::Category(PostCategory::Discussions),
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FeedTab::All => "All Posts",
            FeedTab::Category(category) => category.label(),
        }
    }

    #[must_use]
    pub fn matches(self, post: &Post) -> bool {
        match self {
            FeedTab::All => true,
            FeedTab::Category(category) => post.category == category,
        }
    }
}

/// A post joined with its author. The author reference is weak, so a post
/// can outlive its author and still render.
#[derive(Copy, Clone, Debug)]
pub struct FeedEntry<'a> {
    pub post: &'a Post,
    pub author: Option<&'a User>,
}

/// Filters by the active tab and sorts newest-first. The sort is stable:
/// posts with equal timestamps keep their insertion order.
#[must_use]
pub fn feed_entries<'a>(posts: &'a [Post], users: &'a [User], tab: FeedTab) -> Vec<FeedEntry<'a>> {
    let mut entries: Vec<FeedEntry<'a>> = posts
        .iter()
        .filter(|post| tab.matches(post))
        .map(|post| FeedEntry {
            post,
            author: users.iter().find(|user| user.id == post.author_id),
        })
        .collect();

    entries.sort_by_key(|entry| Reverse(entry.post.timestamp));
    entries
}

/// Per-tab post counts for the filter bar.
#[must_use]
pub fn tab_counts(posts: &[Post]) -> Vec<(FeedTab, usize)> {
    FeedTab::ALL
        .into_iter()
        .map(|tab| (tab, posts.iter().filter(|post| tab.matches(post)).count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{UtcDateTime, macros::utc_datetime};
    use vereinsheim_common::model::Id;

    fn post(id: u64, category: PostCategory, timestamp: UtcDateTime) -> Post {
        Post {
            id: Id::new(id),
            title: format!("Post {id}"),
            content: String::new(),
            category,
            author_id: Id::new(1),
            timestamp,
            likes: 0,
            comments: Vec::new(),
        }
    }

    #[test]
    fn sorted_newest_first_with_stable_ties() {
        let early = utc_datetime!(2024-09-01 10:00);
        let late = utc_datetime!(2024-09-02 10:00);
        let posts = vec![
            post(1, PostCategory::Discussions, early),
            post(2, PostCategory::Discussions, late),
            post(3, PostCategory::Discussions, early),
        ];

        let entries = feed_entries(&posts, &[], FeedTab::All);
        let order: Vec<u64> = entries.iter().map(|entry| entry.post.id.get()).collect();
        // Ties (1 and 3) keep their insertion order.
        assert_eq!(order, [2, 1, 3]);
    }

    #[test]
    fn category_tab_filters() {
        let when = utc_datetime!(2024-09-01 10:00);
        let posts = vec![
            post(1, PostCategory::Announcements, when),
            post(2, PostCategory::Questions, when),
        ];

        let entries = feed_entries(
            &posts,
            &[],
            FeedTab::Category(PostCategory::Announcements),
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].post.id, Id::new(1));
    }

    #[test]
    fn counts_cover_all_tabs() {
        let when = utc_datetime!(2024-09-01 10:00);
        let posts = vec![
            post(1, PostCategory::Announcements, when),
            post(2, PostCategory::Questions, when),
            post(3, PostCategory::Questions, when),
        ];

        let counts = tab_counts(&posts);
        assert_eq!(counts[0], (FeedTab::All, 3));
        assert_eq!(
            counts[2],
            (FeedTab::Category(PostCategory::Questions), 2)
        );
    }

    #[test]
    fn missing_author_is_none() {
        let when = utc_datetime!(2024-09-01 10:00);
        let posts = vec![post(1, PostCategory::Discussions, when)];

        let entries = feed_entries(&posts, &[], FeedTab::All);
        assert!(entries[0].author.is_none());
    }
}
