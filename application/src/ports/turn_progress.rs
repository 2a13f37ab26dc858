//! Turn progress notification port

use concierge_domain::TurnState;

/// Callback for state transitions while a turn is processed.
///
/// Implementations live in the presentation layer (spinner, logs, ...).
pub trait TurnProgressNotifier: Send + Sync {
    fn on_state(&self, state: &TurnState);
}

/// No-op notifier for when progress reporting is not needed
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {
    fn on_state(&self, _state: &TurnState) {}
}
