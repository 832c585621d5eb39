//! # Perfect Color Core
//!
//! An adaptive engine that converges on a person's preferred color through
//! forced-choice comparisons. Candidates are sampled around the current
//! favorite in CIELAB space, the sampling window tightens each round, and
//! the session ends once the remaining candidates are perceptually
//! indistinguishable from the favorite.
//!
//! ## Quick Start
//!
//! ```rust
//! use perfect_color_core::{OptionLabel, Rgb, SessionConfig, SessionController, SessionStage};
//!
//! let mut session = SessionController::with_seed(SessionConfig::default(), 42);
//! session.select_initial(Rgb::new(128, 128, 128));
//!
//! // A user who always keeps their current color converges at the minimum
//! // round count with that color intact.
//! while session.stage() == SessionStage::Presenting {
//!     let presentation = session.presentation().cloned().unwrap();
//!     let keep = presentation
//!         .options
//!         .iter()
//!         .position(|option| option.label == OptionLabel::KeepCurrent)
//!         .unwrap();
//!     session.choose(keep);
//! }
//!
//! assert_eq!(session.final_color(), Some(Rgb::new(128, 128, 128)));
//! ```
//!
//! ## Core Modules
//!
//! - [`color`] - sRGB/CIELAB conversion and color difference
//! - [`session`] - the forced-choice round state machine
//! - [`config`] - session tuning via TOML
//! - [`logging`] - JSON line-delimited session journal

pub mod color;
pub mod config;
pub mod generate;
pub mod logging;
pub mod picker;
pub mod predict;
pub mod present;
pub mod session;
pub mod share;
pub mod store;

pub use color::{delta_e76, hsv_to_rgb, lab_to_rgb, rgb_to_lab, Lab, ParseHexError, Rgb};
pub use config::{ConfigError, SessionConfig};
pub use generate::{generate_candidate, HalfWidths};
pub use logging::{log_result, log_round, RoundLogEntry, SessionResultEntry};
pub use picker::{SvPlane, DEFAULT_PLANE_SIZE};
pub use predict::{predict_from_lab, predict_total_rounds};
pub use present::{
    progress_fraction, progress_line, run_session, PresentationAdapter, RoundAction,
    SessionOutcome,
};
pub use session::{
    HistoryStack, OptionLabel, PresentedOption, RoundPresentation, RoundState, SessionController,
    SessionStage,
};
pub use share::{render_share_card, share_caption};
pub use store::{ResultStore, LAST_COLOR_KEY};
