use crate::views::search;
use vereinsheim_common::{
    model::{
        Id,
        course::{Course, CourseProgressSummary, CourseStatus},
        progress::UserProgress,
        user::UserMarker,
    },
    points,
};

/// Classroom filter tabs, bucketing courses by completion status.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum ClassroomTab {
    #[default]
    All,
    InProgress,
    Completed,
    NotStarted,
}

impl ClassroomTab {
    pub const ALL: [ClassroomTab; 4] = [
        ClassroomTab::All,
        ClassroomTab::InProgress,
        ClassroomTab::Completed,
        ClassroomTab::NotStarted,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ClassroomTab::All => "All Courses",
            ClassroomTab::InProgress => "In Progress",
            ClassroomTab::Completed => "Completed",
            ClassroomTab::NotStarted => "Not Started",
        }
    }

    #[must_use]
    fn matches(self, summary: CourseProgressSummary) -> bool {
        match self {
            ClassroomTab::All => true,
            ClassroomTab::InProgress => summary.status() == CourseStatus::InProgress,
            ClassroomTab::Completed => summary.status() == CourseStatus::Completed,
            ClassroomTab::NotStarted => summary.status() == CourseStatus::NotStarted,
        }
    }
}

/// One course joined with its completion summary and the member's progress
/// record. The summary counts the course's own lesson flags; the record is
/// independent telemetry and may disagree with it.
#[derive(Copy, Clone, Debug)]
pub struct CourseView<'a> {
    pub course: &'a Course,
    pub summary: CourseProgressSummary,
    pub record: Option<&'a UserProgress>,
}

#[must_use]
pub fn course_views<'a>(
    courses: &'a [Course],
    progress: &'a [UserProgress],
    user_id: Id<UserMarker>,
) -> Vec<CourseView<'a>> {
    courses
        .iter()
        .map(|course| CourseView {
            course,
            summary: course.progress_summary(),
            record: progress
                .iter()
                .find(|record| record.user_id == user_id && record.course_id == course.id),
        })
        .collect()
}

/// Applies the active tab and search query.
#[must_use]
pub fn filter<'a>(
    views: &[CourseView<'a>],
    tab: ClassroomTab,
    query: &str,
) -> Vec<CourseView<'a>> {
    views
        .iter()
        .filter(|view| tab.matches(view.summary) && search::course_matches(view.course, query))
        .copied()
        .collect()
}

/// Headline numbers above the course grid.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct ClassroomStats {
    pub completed_courses: usize,
    pub in_progress_courses: usize,
    pub lessons_done: usize,
    pub points_earned: u32,
}

#[must_use]
pub fn stats(views: &[CourseView<'_>]) -> ClassroomStats {
    let completed_courses = views
        .iter()
        .filter(|view| view.summary.status() == CourseStatus::Completed)
        .count();
    let in_progress_courses = views
        .iter()
        .filter(|view| view.summary.status() == CourseStatus::InProgress)
        .count();
    let lessons_done = views.iter().map(|view| view.summary.completed).sum();

    #[allow(clippy::cast_possible_truncation)]
    let points_earned = completed_courses as u32 * points::FINISH_COURSE;

    ClassroomStats {
        completed_courses,
        in_progress_courses,
        lessons_done,
        points_earned,
    }
}
