//! Case-insensitive substring filtering, one matcher per searchable page.
//! An empty or blank query matches everything.

use vereinsheim_common::model::{course::Course, post::Post, user::User};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[must_use]
pub fn member_matches(user: &User, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || contains_ci(&user.name, &needle)
        || contains_ci(&user.bio, &needle)
        || contains_ci(user.activity_level.label(), &needle)
}

#[must_use]
pub fn course_matches(course: &Course, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || contains_ci(&course.title, &needle)
        || contains_ci(&course.description, &needle)
        || contains_ci(&course.category, &needle)
}

#[must_use]
pub fn post_matches(post: &Post, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || contains_ci(&post.title, &needle) || contains_ci(&post.content, &needle)
}

#[must_use]
pub fn filter_members<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    users.iter().filter(|user| member_matches(user, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcDateTime;
    use vereinsheim_common::model::{Id, user::ActivityLevel};

    fn user(name: &str, bio: &str, activity_level: ActivityLevel) -> User {
        User {
            id: Id::new(1),
            name: name.into(),
            avatar: None,
            bio: bio.into(),
            points: 0,
            activity_level,
            join_date: UtcDateTime::now(),
        }
    }

    #[test]
    fn matches_name_bio_and_activity_level() {
        let member = user("Sarah Chen", "Full-stack developer", ActivityLevel::High);

        assert!(member_matches(&member, "sarah"));
        assert!(member_matches(&member, "FULL-STACK"));
        assert!(member_matches(&member, "high"));
        assert!(!member_matches(&member, "designer"));
    }

    #[test]
    fn blank_query_matches_everyone() {
        let members = vec![
            user("A", "", ActivityLevel::Low),
            user("B", "", ActivityLevel::Low),
        ];

        assert_eq!(filter_members(&members, "").len(), 2);
        assert_eq!(filter_members(&members, "   ").len(), 2);
    }
}
