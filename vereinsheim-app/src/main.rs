//! Scripted walkthrough of the platform: loads every page against the
//! seeded stores and exercises the engagement actions, logging what a UI
//! would render.

mod controllers;
mod navigation;
mod notify;
mod views;

use crate::{
    controllers::{
        ClassroomController, FeedController, GuidelinesController, LeaderboardController,
        LessonStep, MembersController,
    },
    navigation::View,
    notify::{Notify, TracingNotifier},
    views::{classroom::ClassroomTab, feed::FeedTab, leaderboard::TimeFrame},
};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vereinsheim_common::{
    markup,
    model::{Id, post::PostCategory, user::UserMarker},
};
use vereinsheim_store::{FixtureError, StoreConfig, Stores};

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error loading seed data: {0}")]
    Fixtures(#[from] FixtureError),
    #[error("The seed data contains no users.")]
    NoUsers,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct Env {
    /// Overrides the per-store simulated latency.
    latency_ms: Option<u64>,
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vereinsheim_app=debug,vereinsheim_store=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let config = env
        .latency_ms
        .map_or_else(StoreConfig::default, |ms| {
            StoreConfig::uniform(Duration::from_millis(ms))
        });
    let stores = Arc::new(Stores::from_fixtures(config)?);
    let notifier: Arc<dyn Notify> = Arc::new(TracingNotifier);

    let session_user = stores
        .users
        .get_all()
        .await
        .first()
        .map(|user| user.id)
        .ok_or(InitError::NoUsers)?;
    info!(%session_user, "session started");

    for view in View::ALL {
        info!(%view, "navigating");
        match view {
            View::Feed => run_feed(&stores, &notifier, session_user).await,
            View::Members => run_members(&stores).await,
            View::Classroom => run_classroom(&stores, &notifier, session_user).await,
            View::Leaderboard => run_leaderboard(&stores).await,
            View::Guidelines => run_guidelines(),
        }
    }

    Ok(())
}

async fn run_feed(stores: &Arc<Stores>, notifier: &Arc<dyn Notify>, session_user: Id<UserMarker>) {
    let mut feed = FeedController::new(Arc::clone(stores), Arc::clone(notifier), session_user);
    feed.load().await;
    for (tab, count) in feed.tab_counts() {
        info!(tab = tab.label(), count, "feed tab");
    }

    feed.create_post(
        "Hello from the walkthrough".into(),
        "Trying out **bold** and *italic* text.".into(),
        PostCategory::Discussions,
    )
    .await;

    if let Some(entry) = feed.visible_posts().first() {
        let author = entry.author.map_or("unknown", |author| author.name.as_str());
        info!(title = %entry.post.title, author, "newest post");
        for line in markup::parse(&entry.post.content) {
            debug!(?line, "content line");
        }
    }
    if let Some(post_id) = feed.state.posts.iter().map(|post| post.id).nth(1) {
        feed.toggle_like(post_id).await;
        feed.submit_comment(post_id, "Great write-up, thanks for sharing!")
            .await;
    }

    feed.set_query("workspace");
    info!(hits = feed.visible_posts().len(), "feed search");
    feed.set_query("");

    feed.set_tab(FeedTab::Category(PostCategory::Questions));
    info!(
        open_questions = feed.visible_posts().len(),
        pending = feed.pending_mutations(),
        "questions tab"
    );
    feed.invalidate();
}

async fn run_members(stores: &Arc<Stores>) {
    let mut members = MembersController::new(Arc::clone(stores));
    members.load().await;
    info!(total = members.state.members.len(), "member directory loaded");

    members.set_query("developer");
    for member in members.visible_members() {
        info!(name = %member.name, points = member.points, "directory hit");
    }
    members.invalidate();
}

async fn run_classroom(
    stores: &Arc<Stores>,
    notifier: &Arc<dyn Notify>,
    session_user: Id<UserMarker>,
) {
    let mut classroom =
        ClassroomController::new(Arc::clone(stores), Arc::clone(notifier), session_user);
    classroom.load().await;
    let stats = classroom.stats();
    info!(
        completed = stats.completed_courses,
        in_progress = stats.in_progress_courses,
        lessons_done = stats.lessons_done,
        "classroom stats"
    );

    let next = classroom.visible_courses().iter().find_map(|view| {
        let lesson = view.course.lessons.iter().find(|lesson| !lesson.completed)?;
        Some((view.course.id, lesson.id))
    });
    if let Some((course_id, lesson_id)) = next {
        classroom.select_course(course_id);
        if let Some((course, lesson)) = classroom.selected_lesson() {
            info!(course = %course.title, lesson = %lesson.title, "opening lesson");
        }
        classroom.complete_lesson(course_id, lesson_id).await;
        classroom.step_lesson(LessonStep::Next);
        if let Some((_, lesson)) = classroom.selected_lesson() {
            info!(lesson = %lesson.title, "up next");
        }
        classroom.close_lesson();
    }

    classroom.set_tab(ClassroomTab::InProgress);
    classroom.set_query("");
    info!(
        in_progress = classroom.visible_courses().len(),
        pending = classroom.pending_mutations(),
        "in-progress courses"
    );
    classroom.invalidate();
}

async fn run_leaderboard(stores: &Arc<Stores>) {
    let mut leaderboard = LeaderboardController::new(Arc::clone(stores));
    leaderboard.load().await;
    leaderboard.set_time_frame(TimeFrame::AllTime);
    for member in leaderboard.rankings().iter().take(3) {
        info!(
            rank = member.rank,
            name = %member.user.name,
            points = member.user.points,
            "podium"
        );
    }
    leaderboard.invalidate();
}

fn run_guidelines() {
    let guidelines = GuidelinesController;
    for rule in guidelines.guidelines() {
        info!(rule = rule.title, "guideline");
    }
    for rule in guidelines.points_system() {
        info!(action = rule.action, points = rule.points, "points rule");
    }
    for &step in guidelines.reporting_steps() {
        info!(step, "reporting");
    }
}
