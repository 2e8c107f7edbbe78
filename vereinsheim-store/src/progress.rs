use crate::{
    Result,
    collection::{Collection, Entity, Placement},
};
use std::time::Duration;
use time::UtcDateTime;
use vereinsheim_common::model::{
    Id,
    course::{CourseMarker, LessonMarker},
    progress::{ProgressDraft, ProgressMarker, ProgressPatch, UserProgress, UserStats},
    user::UserMarker,
};

impl Entity for UserProgress {
    type Marker = ProgressMarker;
    const NAME: &'static str = "User progress";

    fn id(&self) -> Id<ProgressMarker> {
        self.id
    }
}

pub struct ProgressStore {
    collection: Collection<UserProgress>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(seed: Vec<UserProgress>, latency: Duration) -> Self {
        Self {
            collection: Collection::new(seed, latency),
        }
    }

    pub async fn get_all(&self) -> Vec<UserProgress> {
        self.collection.all().await
    }

    pub async fn get_by_id(&self, id: Id<ProgressMarker>) -> Result<UserProgress> {
        self.collection.get(id).await
    }

    pub async fn get_by_user(&self, user_id: Id<UserMarker>) -> Vec<UserProgress> {
        self.collection
            .filter(|progress| progress.user_id == user_id)
            .await
    }

    pub async fn get_by_course(&self, course_id: Id<CourseMarker>) -> Vec<UserProgress> {
        self.collection
            .filter(|progress| progress.course_id == course_id)
            .await
    }

    /// Composite lookup; `None` when the member has not started the course.
    pub async fn get_user_course(
        &self,
        user_id: Id<UserMarker>,
        course_id: Id<CourseMarker>,
    ) -> Option<UserProgress> {
        self.collection
            .find(|progress| progress.user_id == user_id && progress.course_id == course_id)
            .await
    }

    pub async fn create(&self, draft: ProgressDraft) -> UserProgress {
        let now = UtcDateTime::now();
        self.collection
            .insert(Placement::Back, |id| UserProgress {
                id,
                user_id: draft.user_id,
                course_id: draft.course_id,
                completed_lessons: draft.completed_lessons,
                last_accessed_lesson_id: draft.last_accessed_lesson_id,
                started_at: now,
                last_updated: now,
            })
            .await
    }

    pub async fn update(&self, id: Id<ProgressMarker>, patch: ProgressPatch) -> Result<UserProgress> {
        self.collection
            .mutate(id, |progress| {
                patch.apply(progress);
                progress.last_updated = UtcDateTime::now();
            })
            .await
    }

    pub async fn delete(&self, id: Id<ProgressMarker>) -> Result<UserProgress> {
        self.collection.remove(id).await
    }

    /// Upsert by the `(user_id, course_id)` composite key: patches the
    /// existing record, or creates one when the pair is unseen. At most one
    /// record ever exists per pair.
    pub async fn upsert(
        &self,
        user_id: Id<UserMarker>,
        course_id: Id<CourseMarker>,
        patch: ProgressPatch,
    ) -> UserProgress {
        let now = UtcDateTime::now();
        let build_patch = patch.clone();
        self.collection
            .update_or_insert(
                |progress| progress.user_id == user_id && progress.course_id == course_id,
                |progress| {
                    patch.apply(progress);
                    progress.last_updated = now;
                },
                |id| {
                    let mut progress = UserProgress {
                        id,
                        user_id,
                        course_id,
                        completed_lessons: 0,
                        last_accessed_lesson_id: None,
                        started_at: now,
                        last_updated: now,
                    };
                    build_patch.apply(&mut progress);
                    progress
                },
            )
            .await
    }

    /// Bumps the completed-lesson counter and remembers the lesson last
    /// worked on, starting a fresh record when none exists.
    pub async fn increment_completed_lessons(
        &self,
        user_id: Id<UserMarker>,
        course_id: Id<CourseMarker>,
        lesson_id: Id<LessonMarker>,
    ) -> UserProgress {
        let now = UtcDateTime::now();
        self.collection
            .update_or_insert(
                |progress| progress.user_id == user_id && progress.course_id == course_id,
                |progress| {
                    progress.completed_lessons += 1;
                    progress.last_accessed_lesson_id = Some(lesson_id);
                    progress.last_updated = now;
                },
                |id| UserProgress {
                    id,
                    user_id,
                    course_id,
                    completed_lessons: 1,
                    last_accessed_lesson_id: Some(lesson_id),
                    started_at: now,
                    last_updated: now,
                },
            )
            .await
    }

    /// Aggregate over everything the member has started.
    pub async fn user_stats(&self, user_id: Id<UserMarker>) -> UserStats {
        let records = self.get_by_user(user_id).await;

        let courses_started = records.len();
        let lessons_completed: u32 = records
            .iter()
            .map(|progress| progress.completed_lessons)
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let average_progress = if courses_started == 0 {
            0.0
        } else {
            f64::from(lessons_completed) / courses_started as f64
        };

        UserStats {
            courses_started,
            lessons_completed,
            average_progress,
        }
    }
}
