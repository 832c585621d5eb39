//! Forced-choice session state machine.
//!
//! A [`SessionController`] owns everything a running elicitation session
//! needs: the tuning constants, the rng driving candidate generation and
//! option shuffling, the current color, the undo history, and the staged
//! presentation for the round on screen. UIs feed it user actions
//! ([`SessionController::choose`], [`SessionController::go_back`]) and read
//! back plain data; no operation can fail, and actions that make no sense in
//! the current stage are ignored.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::color::{delta_e76, lab_to_rgb, rgb_to_lab, Rgb};
use crate::config::SessionConfig;
use crate::generate::generate_candidate;
use crate::predict::predict_total_rounds;

use super::history::{HistoryStack, RoundState};

/// Lifecycle stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStage {
    /// Waiting for an initial color pick.
    Selecting,
    /// A round of three options is on screen.
    Presenting,
    /// The session converged or hit the round cap.
    Finished,
}

/// Role of one presented option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionLabel {
    KeepCurrent,
    NewOption,
}

impl OptionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::KeepCurrent => "Keep Current",
            OptionLabel::NewOption => "New Option",
        }
    }
}

impl std::fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable swatch of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentedOption {
    pub color: Rgb,
    pub label: OptionLabel,
}

/// Everything a UI needs to render one comparison round. The options arrive
/// already shuffled; exactly one of them carries [`OptionLabel::KeepCurrent`]
/// and holds the session's current color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPresentation {
    pub round_index: usize,
    pub predicted_total_rounds: usize,
    pub options: [PresentedOption; 3],
}

/// State machine driving one elicitation session.
#[derive(Debug)]
pub struct SessionController {
    config: SessionConfig,
    rng: StdRng,
    stage: SessionStage,
    current: Option<Rgb>,
    round_index: usize,
    predicted_total_rounds: usize,
    history: HistoryStack,
    presentation: Option<RoundPresentation>,
}

impl SessionController {
    /// Controller seeded from OS entropy, for interactive use.
    pub fn new(config: SessionConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Deterministic controller for tests and scripted runs.
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: SessionConfig, rng: StdRng) -> Self {
        let predicted_total_rounds = config.max_rounds;
        Self {
            config,
            rng,
            stage: SessionStage::Selecting,
            current: None,
            round_index: 0,
            predicted_total_rounds,
            history: HistoryStack::new(),
            presentation: None,
        }
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The color the session is currently centered on. `None` until an
    /// initial color is selected.
    pub fn current_color(&self) -> Option<Rgb> {
        self.current
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn predicted_total_rounds(&self) -> usize {
        self.predicted_total_rounds
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The round waiting for an answer; `Some` exactly while the stage is
    /// [`SessionStage::Presenting`].
    pub fn presentation(&self) -> Option<&RoundPresentation> {
        self.presentation.as_ref()
    }

    /// The elicited color; `Some` exactly once the stage is
    /// [`SessionStage::Finished`].
    pub fn final_color(&self) -> Option<Rgb> {
        match self.stage {
            SessionStage::Finished => self.current,
            _ => None,
        }
    }

    /// Start a session from the picked color. Ignored unless the controller
    /// is waiting in [`SessionStage::Selecting`].
    pub fn select_initial(&mut self, color: Rgb) {
        if self.stage != SessionStage::Selecting {
            return;
        }
        self.current = Some(color);
        self.round_index = 0;
        self.history.clear();
        self.predicted_total_rounds = predict_total_rounds(color, &self.config);
        self.stage = SessionStage::Presenting;
        self.begin_round();
    }

    /// Accept the option at `index` of the presented round. Out-of-range
    /// indices and calls outside [`SessionStage::Presenting`] are ignored.
    pub fn choose(&mut self, index: usize) {
        if self.stage != SessionStage::Presenting {
            return;
        }
        let chosen = match self
            .presentation
            .as_ref()
            .and_then(|presentation| presentation.options.get(index))
        {
            Some(option) => option.color,
            None => return,
        };
        let current = match self.current {
            Some(color) => color,
            None => return,
        };

        self.history.push(RoundState {
            round_index: self.round_index,
            color: current,
        });
        self.current = Some(chosen);
        self.round_index += 1;
        self.begin_round();
    }

    /// Undo the most recent choice and re-present that round with fresh
    /// candidates. With nothing to undo the session returns to
    /// [`SessionStage::Selecting`]; outside Presenting this is a no-op.
    pub fn go_back(&mut self) {
        if self.stage != SessionStage::Presenting {
            return;
        }
        match self.history.pop() {
            Some(snapshot) => {
                self.current = Some(snapshot.color);
                self.round_index = snapshot.round_index;
                self.begin_round();
            }
            None => {
                self.stage = SessionStage::Selecting;
                self.current = None;
                self.round_index = 0;
                self.presentation = None;
            }
        }
    }

    /// Abandon the session from any stage and return to color selection.
    pub fn reset(&mut self) {
        self.stage = SessionStage::Selecting;
        self.current = None;
        self.round_index = 0;
        self.predicted_total_rounds = self.config.max_rounds;
        self.history.clear();
        self.presentation = None;
    }

    /// Evaluate termination for the upcoming round and, if the session goes
    /// on, generate and stage its three options. Convergence is checked
    /// before the cap: a session that settles on its last allowed round
    /// reports early convergence, not the cap.
    fn begin_round(&mut self) {
        let current = match self.current {
            Some(color) => color,
            None => return,
        };

        if self.round_index >= self.config.min_rounds {
            if let Some(previous) = self.history.last() {
                let drift = delta_e76(rgb_to_lab(current), rgb_to_lab(previous.color));
                if drift < self.config.refinement_threshold {
                    self.predicted_total_rounds = self.round_index;
                    self.finish();
                    return;
                }
            }
        }

        if self.round_index >= self.config.max_rounds {
            self.predicted_total_rounds = self.config.max_rounds;
            self.finish();
            return;
        }

        let reference = rgb_to_lab(current);
        let first = lab_to_rgb(generate_candidate(
            reference,
            self.round_index,
            &self.config,
            &mut self.rng,
        ));
        let second = lab_to_rgb(generate_candidate(
            reference,
            self.round_index,
            &self.config,
            &mut self.rng,
        ));

        let mut options = [
            PresentedOption {
                color: current,
                label: OptionLabel::KeepCurrent,
            },
            PresentedOption {
                color: first,
                label: OptionLabel::NewOption,
            },
            PresentedOption {
                color: second,
                label: OptionLabel::NewOption,
            },
        ];
        options.shuffle(&mut self.rng);

        self.presentation = Some(RoundPresentation {
            round_index: self.round_index,
            predicted_total_rounds: self.predicted_total_rounds,
            options,
        });
    }

    fn finish(&mut self) {
        self.stage = SessionStage::Finished;
        self.presentation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{OptionLabel, RoundPresentation, SessionController, SessionStage};
    use crate::color::Rgb;
    use crate::config::SessionConfig;

    const GRAY: Rgb = Rgb::new(128, 128, 128);

    fn keep_index(presentation: &RoundPresentation) -> usize {
        presentation
            .options
            .iter()
            .position(|option| option.label == OptionLabel::KeepCurrent)
            .unwrap()
    }

    fn new_index(presentation: &RoundPresentation) -> usize {
        presentation
            .options
            .iter()
            .position(|option| option.label == OptionLabel::NewOption)
            .unwrap()
    }

    #[test]
    fn select_initial_stages_round_zero() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 1);
        session.select_initial(GRAY);

        assert_eq!(session.stage(), SessionStage::Presenting);
        assert_eq!(session.round_index(), 0);
        assert_eq!(session.predicted_total_rounds(), 7);
        assert_eq!(session.current_color(), Some(GRAY));

        let presentation = session.presentation().unwrap();
        assert_eq!(presentation.round_index, 0);
        assert_eq!(presentation.predicted_total_rounds, 7);
        let keeps = presentation
            .options
            .iter()
            .filter(|option| option.label == OptionLabel::KeepCurrent)
            .count();
        assert_eq!(keeps, 1);
        assert_eq!(presentation.options[keep_index(presentation)].color, GRAY);
    }

    #[test]
    fn select_initial_is_ignored_while_presenting() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 2);
        session.select_initial(GRAY);
        let staged = session.presentation().cloned();

        session.select_initial(Rgb::new(200, 10, 10));
        assert_eq!(session.current_color(), Some(GRAY));
        assert_eq!(session.presentation().cloned(), staged);
    }

    #[test]
    fn choose_adopts_the_option_and_records_history() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 3);
        session.select_initial(GRAY);

        let presentation = session.presentation().cloned().unwrap();
        let index = new_index(&presentation);
        let expected = presentation.options[index].color;

        session.choose(index);
        assert_eq!(session.round_index(), 1);
        assert_eq!(session.current_color(), Some(expected));
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.stage(), SessionStage::Presenting);
        assert_eq!(session.presentation().unwrap().round_index, 1);
    }

    #[test]
    fn choose_out_of_range_is_ignored() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 4);
        session.select_initial(GRAY);
        let staged = session.presentation().cloned();

        session.choose(3);
        assert_eq!(session.round_index(), 0);
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.presentation().cloned(), staged);
    }

    #[test]
    fn choose_before_selection_is_ignored() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 5);
        session.choose(0);
        assert_eq!(session.stage(), SessionStage::Selecting);
        assert_eq!(session.current_color(), None);
    }

    #[test]
    fn go_back_restores_the_previous_round() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 6);
        session.select_initial(GRAY);

        let first = session.presentation().cloned().unwrap();
        session.choose(new_index(&first));
        assert_ne!(session.current_color(), Some(GRAY));

        session.go_back();
        assert_eq!(session.stage(), SessionStage::Presenting);
        assert_eq!(session.round_index(), 0);
        assert_eq!(session.current_color(), Some(GRAY));
        assert_eq!(session.history_len(), 0);

        // The round is re-presented around the restored color with fresh
        // candidates.
        let representation = session.presentation().unwrap();
        assert_eq!(representation.round_index, 0);
        assert_eq!(
            representation.options[keep_index(representation)].color,
            GRAY
        );
    }

    #[test]
    fn go_back_with_empty_history_returns_to_selecting() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 7);
        session.select_initial(GRAY);

        session.go_back();
        assert_eq!(session.stage(), SessionStage::Selecting);
        assert_eq!(session.current_color(), None);
        assert!(session.presentation().is_none());
    }

    #[test]
    fn keeping_current_converges_at_min_rounds() {
        let config = SessionConfig::default();
        let mut session = SessionController::with_seed(config, 8);
        session.select_initial(GRAY);

        let mut choices = 0;
        while let Some(presentation) = session.presentation().cloned() {
            session.choose(keep_index(&presentation));
            choices += 1;
            assert!(choices <= 16, "session failed to terminate");
        }

        assert_eq!(session.stage(), SessionStage::Finished);
        assert_eq!(choices, 7);
        assert_eq!(session.round_index(), 7);
        assert_eq!(session.predicted_total_rounds(), 7);
        assert_eq!(session.final_color(), Some(GRAY));
    }

    #[test]
    fn early_stop_lowers_a_high_prediction() {
        let blue = Rgb::new(0, 0, 255);
        let mut session = SessionController::with_seed(SessionConfig::default(), 9);
        session.select_initial(blue);
        assert_eq!(session.predicted_total_rounds(), 14);

        while let Some(presentation) = session.presentation().cloned() {
            session.choose(keep_index(&presentation));
        }
        assert_eq!(session.predicted_total_rounds(), 7);
        assert_eq!(session.final_color(), Some(blue));
    }

    #[test]
    fn default_decay_converges_soon_after_min_rounds() {
        // From round 8 on, the shrunken half-widths cannot reach the
        // refinement threshold, so even a user who always takes a new option
        // converges within two rounds of the minimum.
        for seed in 0..10 {
            let mut session = SessionController::with_seed(SessionConfig::default(), seed);
            session.select_initial(Rgb::new(30, 200, 90));
            while let Some(presentation) = session.presentation().cloned() {
                session.choose(new_index(&presentation));
            }
            assert_eq!(session.stage(), SessionStage::Finished);
            assert!(
                (7..=9).contains(&session.round_index()),
                "seed {} finished at round {}",
                seed,
                session.round_index()
            );
        }
    }

    #[test]
    fn slow_decay_runs_into_the_hard_cap() {
        let mut config = SessionConfig::default();
        config.base_decay_factor = 1.01;
        config.refinement_threshold = 0.001;

        let mut session = SessionController::with_seed(config, 10);
        session.select_initial(Rgb::new(90, 60, 200));

        let mut choices = 0;
        while let Some(presentation) = session.presentation().cloned() {
            session.choose(new_index(&presentation));
            choices += 1;
            assert!(choices <= 15, "cap must bound the session");
        }

        assert_eq!(session.stage(), SessionStage::Finished);
        assert_eq!(session.round_index(), 15);
        assert_eq!(session.predicted_total_rounds(), 15);
        assert!(session.final_color().is_some());
    }

    #[test]
    fn go_back_after_finish_is_ignored() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 11);
        session.select_initial(GRAY);
        while let Some(presentation) = session.presentation().cloned() {
            session.choose(keep_index(&presentation));
        }

        session.go_back();
        assert_eq!(session.stage(), SessionStage::Finished);
        assert_eq!(session.final_color(), Some(GRAY));
    }

    #[test]
    fn reset_clears_everything_from_any_stage() {
        let mut session = SessionController::with_seed(SessionConfig::default(), 12);
        session.select_initial(GRAY);
        session.choose(0);
        session.reset();

        assert_eq!(session.stage(), SessionStage::Selecting);
        assert_eq!(session.current_color(), None);
        assert_eq!(session.round_index(), 0);
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.predicted_total_rounds(), 15);
        assert!(session.presentation().is_none());

        // A fresh session can start immediately after the reset.
        session.select_initial(GRAY);
        assert_eq!(session.stage(), SessionStage::Presenting);
    }
}
