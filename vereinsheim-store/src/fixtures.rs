//! Static seed data, embedded at compile time and parsed once per store
//! construction. The embedded text is the only persisted state in the
//! system and is never written back.

use thiserror::Error;
use vereinsheim_common::model::{course::Course, post::Post, progress::UserProgress, user::User};

const POSTS: &str = include_str!("../fixtures/posts.json");
const USERS: &str = include_str!("../fixtures/users.json");
const COURSES: &str = include_str!("../fixtures/courses.json");
const USER_PROGRESS: &str = include_str!("../fixtures/user_progress.json");

#[derive(Debug, Error)]
#[error("Fixture {name} could not be parsed: {source}")]
pub struct FixtureError {
    pub name: &'static str,
    #[source]
    source: serde_json::Error,
}

fn parse<T: serde::de::DeserializeOwned>(
    name: &'static str,
    raw: &str,
) -> Result<Vec<T>, FixtureError> {
    serde_json::from_str(raw).map_err(|source| FixtureError { name, source })
}

pub fn posts() -> Result<Vec<Post>, FixtureError> {
    parse("posts", POSTS)
}

pub fn users() -> Result<Vec<User>, FixtureError> {
    parse("users", USERS)
}

pub fn courses() -> Result<Vec<Course>, FixtureError> {
    parse("courses", COURSES)
}

pub fn user_progress() -> Result<Vec<UserProgress>, FixtureError> {
    parse("user_progress", USER_PROGRESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_fixtures_parse() {
        assert!(!posts().unwrap().is_empty());
        assert!(!users().unwrap().is_empty());
        assert!(!courses().unwrap().is_empty());
        assert!(!user_progress().unwrap().is_empty());
    }

    #[test]
    fn fixture_ids_are_unique_per_collection() {
        let post_ids: HashSet<u64> = posts().unwrap().iter().map(|p| p.id.get()).collect();
        assert_eq!(post_ids.len(), posts().unwrap().len());

        let user_ids: HashSet<u64> = users().unwrap().iter().map(|u| u.id.get()).collect();
        assert_eq!(user_ids.len(), users().unwrap().len());
    }

    #[test]
    fn progress_pairs_are_unique() {
        let records = user_progress().unwrap();
        let pairs: HashSet<(u64, u64)> = records
            .iter()
            .map(|record| (record.user_id.get(), record.course_id.get()))
            .collect();
        assert_eq!(pairs.len(), records.len());
    }

    #[test]
    fn post_authors_exist() {
        let user_ids: HashSet<u64> = users().unwrap().iter().map(|u| u.id.get()).collect();
        for post in posts().unwrap() {
            assert!(user_ids.contains(&post.author_id.get()));
        }
    }
}
