use crate::model::{
    Id,
    course::{CourseMarker, LessonMarker},
    user::UserMarker,
};
use serde::{Deserialize, Serialize};
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ProgressMarker;

/// Engagement telemetry for one member in one course.
///
/// At most one record exists per `(user_id, course_id)` pair; the progress
/// store upserts by that composite key. `completed_lessons` is tracked
/// independently from the `completed` flags on the course's lessons; the
/// store never reconciles the two, callers update both.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserProgress {
    pub id: Id<ProgressMarker>,
    pub user_id: Id<UserMarker>,
    pub course_id: Id<CourseMarker>,
    pub completed_lessons: u32,
    pub last_accessed_lesson_id: Option<Id<LessonMarker>>,
    #[serde(with = "crate::model::rfc3339")]
    pub started_at: UtcDateTime,
    #[serde(with = "crate::model::rfc3339")]
    pub last_updated: UtcDateTime,
}

/// Caller-supplied fields for a new progress record; the store assigns the
/// id and both timestamps. Prefer the store's composite upsert unless the
/// pair is known to be unseen.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ProgressDraft {
    pub user_id: Id<UserMarker>,
    pub course_id: Id<CourseMarker>,
    pub completed_lessons: u32,
    pub last_accessed_lesson_id: Option<Id<LessonMarker>>,
}

/// Partial update; the store refreshes `last_updated` on every apply.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ProgressPatch {
    pub completed_lessons: Option<u32>,
    pub last_accessed_lesson_id: Option<Id<LessonMarker>>,
}

impl ProgressPatch {
    pub fn apply(self, progress: &mut UserProgress) {
        if let Some(completed_lessons) = self.completed_lessons {
            progress.completed_lessons = completed_lessons;
        }
        if let Some(lesson_id) = self.last_accessed_lesson_id {
            progress.last_accessed_lesson_id = Some(lesson_id);
        }
    }
}

/// Aggregate over all of one member's progress records.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct UserStats {
    pub courses_started: usize,
    pub lessons_completed: u32,
    pub average_progress: f64,
}
