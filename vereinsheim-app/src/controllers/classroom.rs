use crate::{
    controllers::{CorrelationId, Correlations},
    notify::Notify,
    views::classroom::{self, ClassroomStats, ClassroomTab, CourseView},
};
use std::sync::Arc;
use tracing::{debug, warn};
use vereinsheim_common::{
    model::{
        Id,
        course::{Course, CourseMarker, CourseStatus, Lesson, LessonMarker},
        progress::UserProgress,
        user::UserMarker,
    },
    points,
};
use vereinsheim_store::Stores;

/// Which lesson the reader moves to inside the open course.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum LessonStep {
    Previous,
    Next,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
struct SelectedLesson {
    course_id: Id<CourseMarker>,
    lesson_index: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ClassroomState {
    pub courses: Vec<Course>,
    pub progress: Vec<UserProgress>,
    pub active_tab: ClassroomTab,
    pub query: String,
    pub loading: bool,
    selected: Option<SelectedLesson>,
    pending: Vec<CorrelationId>,
}

pub struct ClassroomController {
    stores: Arc<Stores>,
    notifier: Arc<dyn Notify>,
    session_user: Id<UserMarker>,
    correlations: Correlations,
    generation: u64,
    pub state: ClassroomState,
}

impl ClassroomController {
    #[must_use]
    pub fn new(
        stores: Arc<Stores>,
        notifier: Arc<dyn Notify>,
        session_user: Id<UserMarker>,
    ) -> Self {
        ClassroomController {
            stores,
            notifier,
            session_user,
            correlations: Correlations::default(),
            generation: 0,
            state: ClassroomState::default(),
        }
    }

    pub async fn load(&mut self) {
        let generation = self.begin_load();
        let (courses, progress) = tokio::join!(
            self.stores.courses.get_all(),
            self.stores.progress.get_by_user(self.session_user),
        );
        self.apply_load(generation, courses, progress);
    }

    pub(crate) fn begin_load(&mut self) -> u64 {
        self.state.loading = true;
        self.generation += 1;
        self.generation
    }

    pub(crate) fn apply_load(
        &mut self,
        generation: u64,
        courses: Vec<Course>,
        progress: Vec<UserProgress>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale classroom load");
            return false;
        }
        self.state.courses = courses;
        self.state.progress = progress;
        self.state.loading = false;
        true
    }

    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn set_tab(&mut self, tab: ClassroomTab) {
        self.state.active_tab = tab;
    }

    pub fn set_query(&mut self, query: &str) {
        query.clone_into(&mut self.state.query);
    }

    #[must_use]
    pub fn course_views(&self) -> Vec<CourseView<'_>> {
        classroom::course_views(&self.state.courses, &self.state.progress, self.session_user)
    }

    /// Courses under the active tab and query.
    #[must_use]
    pub fn visible_courses(&self) -> Vec<CourseView<'_>> {
        let views = self.course_views();
        classroom::filter(&views, self.state.active_tab, &self.state.query)
    }

    #[must_use]
    pub fn stats(&self) -> ClassroomStats {
        classroom::stats(&self.course_views())
    }

    #[must_use]
    pub fn pending_mutations(&self) -> usize {
        self.state.pending.len()
    }

    /// Opens a course at its first incomplete lesson, or the first lesson
    /// when everything is done already.
    pub fn select_course(&mut self, course_id: Id<CourseMarker>) {
        let Some(course) = self
            .state
            .courses
            .iter()
            .find(|course| course.id == course_id)
        else {
            return;
        };
        if course.lessons.is_empty() {
            return;
        }
        let lesson_index = course
            .lessons
            .iter()
            .position(|lesson| !lesson.completed)
            .unwrap_or(0);
        self.state.selected = Some(SelectedLesson {
            course_id,
            lesson_index,
        });
    }

    pub fn close_lesson(&mut self) {
        self.state.selected = None;
    }

    #[must_use]
    pub fn selected_lesson(&self) -> Option<(&Course, &Lesson)> {
        let selected = self.state.selected?;
        let course = self
            .state
            .courses
            .iter()
            .find(|course| course.id == selected.course_id)?;
        let lesson = course.lessons.get(selected.lesson_index)?;
        Some((course, lesson))
    }

    /// Moves within the open course, clamped at both ends.
    pub fn step_lesson(&mut self, step: LessonStep) {
        let Some(selected) = self.state.selected.as_mut() else {
            return;
        };
        let Some(course) = self
            .state
            .courses
            .iter()
            .find(|course| course.id == selected.course_id)
        else {
            return;
        };
        match step {
            LessonStep::Previous => {
                selected.lesson_index = selected.lesson_index.saturating_sub(1);
            }
            LessonStep::Next => {
                if selected.lesson_index + 1 < course.lessons.len() {
                    selected.lesson_index += 1;
                }
            }
        }
    }

    /// Optimistically flags the lesson done, confirms with the store, then
    /// follows up with the progress record and points. The follow-ups are
    /// independent calls and never roll the completion back.
    pub async fn complete_lesson(
        &mut self,
        course_id: Id<CourseMarker>,
        lesson_id: Id<LessonMarker>,
    ) {
        let already_done = self
            .state
            .courses
            .iter()
            .find(|course| course.id == course_id)
            .and_then(|course| course.lessons.iter().find(|lesson| lesson.id == lesson_id))
            .map(|lesson| lesson.completed);
        if already_done != Some(false) {
            return;
        }
        let correlation = self.correlations.next();

        if let Some(lesson) = self
            .state
            .courses
            .iter_mut()
            .find(|course| course.id == course_id)
            .and_then(|course| {
                course
                    .lessons
                    .iter_mut()
                    .find(|lesson| lesson.id == lesson_id)
            })
        {
            lesson.completed = true;
        }
        self.state.pending.push(correlation);

        match self
            .stores
            .courses
            .mark_lesson_complete(course_id, lesson_id)
            .await
        {
            Ok(course) => {
                self.settle(correlation);
                let finished = course.progress_summary().status() == CourseStatus::Completed;
                if let Some(slot) = self
                    .state
                    .courses
                    .iter_mut()
                    .find(|slot| slot.id == course.id)
                {
                    *slot = course;
                }

                let record = self
                    .stores
                    .progress
                    .increment_completed_lessons(self.session_user, course_id, lesson_id)
                    .await;
                self.replace_record(record);

                self.award_points(
                    points::COMPLETE_LESSON,
                    &format!("Lesson complete! +{} points", points::COMPLETE_LESSON),
                )
                .await;
                if finished {
                    self.award_points(
                        points::FINISH_COURSE,
                        &format!("Course finished! +{} points", points::FINISH_COURSE),
                    )
                    .await;
                }
            }
            Err(error) => {
                warn!(%error, %course_id, %lesson_id, "lesson completion failed, reloading");
                self.notifier
                    .error("Could not save the lesson. Refreshing the classroom.");
                self.settle(correlation);
                self.load().await;
            }
        }
    }

    fn settle(&mut self, correlation: CorrelationId) {
        self.state.pending.retain(|&pending| pending != correlation);
    }

    fn replace_record(&mut self, record: UserProgress) {
        if let Some(slot) = self
            .state
            .progress
            .iter_mut()
            .find(|slot| slot.id == record.id)
        {
            *slot = record;
        } else {
            self.state.progress.push(record);
        }
    }

    async fn award_points(&mut self, amount: u32, message: &str) {
        #[allow(clippy::cast_possible_wrap)]
        match self.stores.users.add_points(self.session_user, amount as i32).await {
            Ok(_) => self.notifier.success(message),
            Err(error) => warn!(%error, "points award failed"),
        }
    }
}
