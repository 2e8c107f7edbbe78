use crate::model::Id;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CourseMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct LessonMarker;

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Course {
    pub id: Id<CourseMarker>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    /// Curriculum order.
    pub lessons: Vec<Lesson>,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Id<LessonMarker>,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub resources: Vec<LessonResource>,
    /// Mutated only through explicit completion calls on the course store.
    pub completed: bool,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct LessonResource {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
}

impl CoursePatch {
    pub fn apply(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(category) = self.category {
            course.category = category;
        }
        if let Some(duration) = self.duration {
            course.duration = duration;
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct LessonPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub completed: Option<bool>,
}

impl LessonPatch {
    pub fn apply(self, lesson: &mut Lesson) {
        if let Some(title) = self.title {
            lesson.title = title;
        }
        if let Some(content) = self.content {
            lesson.content = content;
        }
        if let Some(video_url) = self.video_url {
            lesson.video_url = Some(video_url);
        }
        if let Some(completed) = self.completed {
            lesson.completed = completed;
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum CourseStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl CourseStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CourseStatus::NotStarted => "Not Started",
            CourseStatus::InProgress => "In Progress",
            CourseStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-course completion derived from the course's own lesson list.
///
/// This deliberately does not consult [`UserProgress`] records: the two are
/// independently mutated sources of truth and may disagree.
///
/// [`UserProgress`]: crate::model::progress::UserProgress
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct CourseProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl CourseProgressSummary {
    /// Completion as a percentage in `0.0..=100.0`. A course with no
    /// lessons is 0%, never a division fault.
    #[must_use]
    pub fn percentage(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    #[must_use]
    pub fn status(self) -> CourseStatus {
        if self.completed == 0 {
            CourseStatus::NotStarted
        } else if self.completed < self.total {
            CourseStatus::InProgress
        } else {
            CourseStatus::Completed
        }
    }
}

impl Course {
    #[must_use]
    pub fn progress_summary(&self) -> CourseProgressSummary {
        CourseProgressSummary {
            completed: self.lessons.iter().filter(|lesson| lesson.completed).count(),
            total: self.lessons.len(),
        }
    }
}
