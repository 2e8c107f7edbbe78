use crate::{
    Result, StoreError,
    collection::{Collection, Entity, Placement},
};
use std::time::Duration;
use vereinsheim_common::model::{
    Id,
    course::{
        Course, CourseDraft, CourseMarker, CoursePatch, CourseProgressSummary, Lesson,
        LessonMarker, LessonPatch,
    },
};

impl Entity for Course {
    type Marker = CourseMarker;
    const NAME: &'static str = "Course";

    fn id(&self) -> Id<CourseMarker> {
        self.id
    }
}

pub struct CourseStore {
    collection: Collection<Course>,
}

impl CourseStore {
    #[must_use]
    pub fn new(seed: Vec<Course>, latency: Duration) -> Self {
        Self {
            collection: Collection::new(seed, latency),
        }
    }

    pub async fn get_all(&self) -> Vec<Course> {
        self.collection.all().await
    }

    pub async fn get_by_id(&self, id: Id<CourseMarker>) -> Result<Course> {
        self.collection.get(id).await
    }

    pub async fn create(&self, draft: CourseDraft) -> Course {
        self.collection
            .insert(Placement::Back, |id| Course {
                id,
                title: draft.title,
                description: draft.description,
                category: draft.category,
                duration: draft.duration,
                lessons: draft.lessons,
            })
            .await
    }

    pub async fn update(&self, id: Id<CourseMarker>, patch: CoursePatch) -> Result<Course> {
        self.collection.mutate(id, |course| patch.apply(course)).await
    }

    pub async fn delete(&self, id: Id<CourseMarker>) -> Result<Course> {
        self.collection.remove(id).await
    }

    pub async fn get_lesson(
        &self,
        course_id: Id<CourseMarker>,
        lesson_id: Id<LessonMarker>,
    ) -> Result<Lesson> {
        let course = self.get_by_id(course_id).await?;
        course
            .lessons
            .into_iter()
            .find(|lesson| lesson.id == lesson_id)
            .ok_or_else(|| StoreError::not_found("Lesson", lesson_id))
    }

    /// Nested mutation: patches one lesson inside the course record. The
    /// lesson lookup and the patch happen in the same critical section.
    pub async fn update_lesson(
        &self,
        course_id: Id<CourseMarker>,
        lesson_id: Id<LessonMarker>,
        patch: LessonPatch,
    ) -> Result<Course> {
        self.collection
            .try_mutate(course_id, |course| {
                let lesson = course
                    .lessons
                    .iter_mut()
                    .find(|lesson| lesson.id == lesson_id)
                    .ok_or_else(|| StoreError::not_found("Lesson", lesson_id))?;
                patch.apply(lesson);
                Ok(())
            })
            .await
    }

    pub async fn mark_lesson_complete(
        &self,
        course_id: Id<CourseMarker>,
        lesson_id: Id<LessonMarker>,
    ) -> Result<Course> {
        self.update_lesson(
            course_id,
            lesson_id,
            LessonPatch {
                completed: Some(true),
                ..LessonPatch::default()
            },
        )
        .await
    }

    pub async fn mark_lesson_incomplete(
        &self,
        course_id: Id<CourseMarker>,
        lesson_id: Id<LessonMarker>,
    ) -> Result<Course> {
        self.update_lesson(
            course_id,
            lesson_id,
            LessonPatch {
                completed: Some(false),
                ..LessonPatch::default()
            },
        )
        .await
    }

    /// Completion summary derived from the course's own lesson flags.
    pub async fn progress(&self, course_id: Id<CourseMarker>) -> Result<CourseProgressSummary> {
        Ok(self.get_by_id(course_id).await?.progress_summary())
    }

    /// Case-insensitive substring match over title and description.
    pub async fn search(&self, query: &str) -> Vec<Course> {
        let needle = query.to_lowercase();
        self.collection
            .filter(|course| {
                course.title.to_lowercase().contains(&needle)
                    || course.description.to_lowercase().contains(&needle)
            })
            .await
    }
}
