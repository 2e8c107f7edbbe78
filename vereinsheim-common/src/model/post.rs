use crate::model::{Id, user::UserMarker};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

/// Fixed set of feed categories.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    Announcements,
    Questions,
    Discussions,
}

impl PostCategory {
    pub const ALL: [PostCategory; 3] = [
        PostCategory::Announcements,
        PostCategory::Questions,
        PostCategory::Discussions,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PostCategory::Announcements => "Announcements",
            PostCategory::Questions => "Questions",
            PostCategory::Discussions => "Discussions",
        }
    }
}

impl std::fmt::Display for PostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: String,
    /// Rich text in the minimal markup subset, see [`crate::markup`].
    pub content: String,
    pub category: PostCategory,
    /// Weak reference: the author may have been deleted since.
    pub author_id: Id<UserMarker>,
    #[serde(with = "crate::model::rfc3339")]
    pub timestamp: UtcDateTime,
    pub likes: u32,
    pub comments: Vec<Comment>,
}

/// Owned exclusively by its parent [`Post`]; never stored independently.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub content: String,
    pub author_id: Id<UserMarker>,
    #[serde(with = "crate::model::rfc3339")]
    pub timestamp: UtcDateTime,
}

/// Caller-supplied fields for creating a post. The store assigns the id,
/// the timestamp, and zeroed engagement counters.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: PostCategory,
    pub author_id: Id<UserMarker>,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum PostDraftError {
    #[error("A post needs a title.")]
    EmptyTitle,
    #[error("A post needs some content.")]
    EmptyContent,
}

impl PostDraft {
    /// View-layer validation: blank required fields are rejected before any
    /// store call is attempted.
    pub fn validate(&self) -> Result<(), PostDraftError> {
        if self.title.trim().is_empty() {
            return Err(PostDraftError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(PostDraftError::EmptyContent);
        }
        Ok(())
    }
}

/// Partial update, shallow-merged over the existing record.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<PostCategory>,
}

impl PostPatch {
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
    }
}

/// Caller-supplied fields for a new comment; the store assigns a
/// post-locally-unique id and the timestamp.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CommentDraft {
    pub content: String,
    pub author_id: Id<UserMarker>,
}
