pub mod controller;
pub mod history;

pub use controller::{
    OptionLabel, PresentedOption, RoundPresentation, SessionController, SessionStage,
};
pub use history::{HistoryStack, RoundState};
