use tracing::{info, warn};

/// Fire-and-forget user-visible announcements after mutations. Controllers
/// call in with plain text and expect nothing back that affects control
/// flow.
pub trait Notify {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink: structured log lines stand in for toast popups.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct TracingNotifier;

impl Notify for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "vereinsheim_app::toast", "{message}");
    }

    fn error(&self, message: &str) {
        warn!(target: "vereinsheim_app::toast", "{message}");
    }
}
