use vereinsheim_common::points;

/// One community rule as shown on the guidelines page.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Guideline {
    pub title: &'static str,
    pub description: &'static str,
}

/// One row of the "how to earn points" table.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PointsRule {
    pub action: &'static str,
    pub points: u32,
}

/// The guidelines page is entirely static, so this controller owns no
/// state and never touches the stores.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct GuidelinesController;

impl GuidelinesController {
    #[must_use]
    pub fn guidelines(self) -> &'static [Guideline] {
        GUIDELINES
    }

    #[must_use]
    pub fn points_system(self) -> &'static [PointsRule] {
        POINTS_SYSTEM
    }

    #[must_use]
    pub fn reporting_steps(self) -> &'static [&'static str] {
        REPORTING_STEPS
    }
}

const GUIDELINES: &[Guideline] = &[
    Guideline {
        title: "Be Respectful",
        description: "Treat every member with kindness. Disagree with ideas, \
                      never with people.",
    },
    Guideline {
        title: "Stay On Topic",
        description: "Keep posts relevant to the community. Pick the category \
                      that fits before publishing.",
    },
    Guideline {
        title: "No Self-Promotion",
        description: "Do not advertise products or services outside the \
                      designated spaces.",
    },
    Guideline {
        title: "Protect Privacy",
        description: "Never share another member's personal information, in \
                      posts or in comments.",
    },
    Guideline {
        title: "Give Constructive Feedback",
        description: "When critiquing someone's work, point out what to \
                      improve and how.",
    },
];

const POINTS_SYSTEM: &[PointsRule] = &[
    PointsRule {
        action: "Create a post",
        points: points::CREATE_POST,
    },
    PointsRule {
        action: "Comment on a post",
        points: points::COMMENT_ON_POST,
    },
    PointsRule {
        action: "Like a post",
        points: points::LIKE_POST,
    },
    PointsRule {
        action: "Complete a lesson",
        points: points::COMPLETE_LESSON,
    },
    PointsRule {
        action: "Finish a course",
        points: points::FINISH_COURSE,
    },
    PointsRule {
        action: "Help other members",
        points: points::HELP_OTHERS,
    },
];

const REPORTING_STEPS: &[&str] = &[
    "Use the report button on the post or comment.",
    "Describe what rule was broken and where.",
    "A moderator reviews every report within 24 hours.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_is_filled_in() {
        let controller = GuidelinesController;
        assert!(!controller.guidelines().is_empty());
        assert!(
            controller
                .guidelines()
                .iter()
                .all(|rule| !rule.title.is_empty() && !rule.description.is_empty())
        );
    }

    #[test]
    fn points_table_mirrors_the_award_constants() {
        let table = GuidelinesController.points_system();
        let lookup = |action: &str| {
            table
                .iter()
                .find(|rule| rule.action == action)
                .map(|rule| rule.points)
        };

        assert_eq!(lookup("Create a post"), Some(points::CREATE_POST));
        assert_eq!(lookup("Finish a course"), Some(points::FINISH_COURSE));
        assert_eq!(lookup("Help other members"), Some(points::HELP_OTHERS));
    }
}
