//! Progress reporting for turn execution

use concierge_application::TurnProgressNotifier;
use concierge_domain::TurnState;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Spinner shown while a turn is being processed
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Spinner message for a state.
    fn state_message(state: &TurnState) -> String {
        match state {
            TurnState::Received => "Reading your question...".to_string(),
            TurnState::Classified(category) => format!("Question type: {category}"),
            TurnState::Routed(expert) => format!("Asking the {}...", expert.display_name()),
            TurnState::Generating => "Writing the answer...".to_string(),
            TurnState::Succeeded => "Done".to_string(),
            TurnState::Failed => "Failed".to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_state(&self, state: &TurnState) {
        debug!(state = state.label(), "Turn state");
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };

        if state.is_terminal() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
            return;
        }

        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        pb.set_message(Self::state_message(state));
    }
}
