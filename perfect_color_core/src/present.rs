//! UI boundary for comparison rounds.
//!
//! The session core emits plain data ([`RoundPresentation`]) and consumes
//! plain answers ([`RoundAction`]); everything that actually draws swatches
//! or reads input lives behind [`PresentationAdapter`]. [`run_session`]
//! connects a controller to an adapter and performs one bounded unit of work
//! per user action until the session leaves the presenting stage.

use anyhow::Result;

use crate::color::Rgb;
use crate::session::{RoundPresentation, SessionController, SessionStage};

/// What the user did with a presented round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    /// Accept the option at this index of the shuffled presentation.
    Choose(usize),
    /// Undo the previous choice (or leave the session if there is none).
    Back,
}

/// How a driven session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The session converged on this color.
    Finished(Rgb),
    /// The user backed out past the first round; the caller should return
    /// to color selection.
    BackedOut,
}

/// Rendering side of a session. Implementations block in
/// [`PresentationAdapter::present_options`] until the user answers.
pub trait PresentationAdapter {
    /// Show the three options and wait for an answer.
    fn present_options(&mut self, presentation: &RoundPresentation) -> Result<RoundAction>;

    /// Update the progress display. Failures here are cosmetic and the
    /// driver skips them with a warning.
    fn render_progress(&mut self, round_index: usize, predicted_total_rounds: usize)
        -> Result<()>;
}

/// Drive `controller` with answers from `adapter` until the session finishes
/// or the user backs out to color selection.
///
/// The controller must already be presenting (after
/// [`SessionController::select_initial`]); otherwise the call returns
/// [`SessionOutcome::BackedOut`] immediately.
pub fn run_session<A: PresentationAdapter>(
    controller: &mut SessionController,
    adapter: &mut A,
) -> Result<SessionOutcome> {
    while let Some(presentation) = controller.presentation().cloned() {
        if let Err(err) =
            adapter.render_progress(presentation.round_index, presentation.predicted_total_rounds)
        {
            tracing::warn!("progress display failed: {err}");
        }

        match adapter.present_options(&presentation)? {
            RoundAction::Choose(index) => controller.choose(index),
            RoundAction::Back => controller.go_back(),
        }

        if controller.stage() == SessionStage::Selecting {
            return Ok(SessionOutcome::BackedOut);
        }
    }

    match controller.final_color() {
        Some(color) => Ok(SessionOutcome::Finished(color)),
        None => Ok(SessionOutcome::BackedOut),
    }
}

/// Progress caption shown above a round, 1-based for display.
pub fn progress_line(round_index: usize, predicted_total_rounds: usize) -> String {
    format!(
        "Round {} of {}: Which option looks best?",
        round_index + 1,
        predicted_total_rounds
    )
}

/// Fill fraction for a progress bar, clamped to [0, 1]. The prediction may
/// undershoot the actual session length, so the bar saturates rather than
/// overflows.
pub fn progress_fraction(round_index: usize, predicted_total_rounds: usize) -> f32 {
    if predicted_total_rounds == 0 {
        return 0.0;
    }
    (round_index as f32 / predicted_total_rounds as f32).clamp(0.0, 1.0)
}
