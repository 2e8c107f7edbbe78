/// The five named views of the platform. Routing is an opaque surface: the
/// shell maps each variant to its controller and nothing more.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum View {
    #[default]
    Feed,
    Members,
    Classroom,
    Leaderboard,
    Guidelines,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Feed,
        View::Members,
        View::Classroom,
        View::Leaderboard,
        View::Guidelines,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            View::Feed => "Community Feed",
            View::Members => "Members",
            View::Classroom => "Learning Classroom",
            View::Leaderboard => "Community Leaderboard",
            View::Guidelines => "Community Guidelines",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
