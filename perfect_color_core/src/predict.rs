//! Session length prediction from the starting color.
//!
//! Saturated starting colors historically take more comparisons to settle
//! than neutral ones, so the expected round count is interpolated from the
//! chroma magnitude of the initial pick. The estimate only drives the
//! progress display; termination is decided round by round by the session
//! controller.

use crate::color::{rgb_to_lab, Lab, Rgb};
use crate::config::SessionConfig;

/// Chroma magnitude at which a session is budgeted the full round count.
/// Real sRGB colors top out around 134; values at or past this ceiling map
/// to `max_rounds`.
const SATURATED_CHROMA: f32 = 150.0;

/// Predict the total number of rounds for a session starting at `initial`.
///
/// Linear interpolation between `min_rounds` (neutral axis, chroma 0) and
/// `max_rounds` (chroma ≥ [`SATURATED_CHROMA`]), rounded to the nearest
/// round and clamped into the configured window.
pub fn predict_from_lab(initial: Lab, config: &SessionConfig) -> usize {
    let span = (config.max_rounds - config.min_rounds) as f32;
    let predicted = config.min_rounds as f32 + (initial.chroma() / SATURATED_CHROMA) * span;
    (predicted.round() as usize).clamp(config.min_rounds, config.max_rounds)
}

/// [`predict_from_lab`] on the CIELAB view of an sRGB color.
pub fn predict_total_rounds(initial: Rgb, config: &SessionConfig) -> usize {
    predict_from_lab(rgb_to_lab(initial), config)
}

#[cfg(test)]
mod tests {
    use super::{predict_from_lab, predict_total_rounds};
    use crate::color::{Lab, Rgb};
    use crate::config::SessionConfig;

    #[test]
    fn neutral_gray_predicts_minimum() {
        let config = SessionConfig::default();
        assert_eq!(predict_total_rounds(Rgb::new(128, 128, 128), &config), 7);
        assert_eq!(predict_total_rounds(Rgb::new(0, 0, 0), &config), 7);
        assert_eq!(predict_total_rounds(Rgb::new(255, 255, 255), &config), 7);
    }

    #[test]
    fn saturated_chroma_predicts_maximum() {
        let config = SessionConfig::default();
        assert_eq!(predict_from_lab(Lab::new(50.0, 150.0, 0.0), &config), 15);
        assert_eq!(predict_from_lab(Lab::new(50.0, 120.0, -120.0), &config), 15);
    }

    #[test]
    fn interpolates_between_the_bounds() {
        let config = SessionConfig::default();
        // chroma 75 sits halfway: 7 + 0.5 * 8 = 11.
        assert_eq!(predict_from_lab(Lab::new(50.0, 75.0, 0.0), &config), 11);
        // chroma 45: 7 + 0.3 * 8 = 9.4, rounds to 9.
        assert_eq!(predict_from_lab(Lab::new(50.0, 0.0, 45.0), &config), 9);
    }

    #[test]
    fn every_rgb_prediction_stays_in_window() {
        let config = SessionConfig::default();
        for r in (0..=255u16).step_by(51) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(51) {
                    let predicted =
                        predict_total_rounds(Rgb::new(r as u8, g as u8, b as u8), &config);
                    assert!(
                        (config.min_rounds..=config.max_rounds).contains(&predicted),
                        "prediction {} out of window for ({}, {}, {})",
                        predicted,
                        r,
                        g,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn saturated_primaries_predict_near_the_cap() {
        let config = SessionConfig::default();
        assert!(predict_total_rounds(Rgb::new(0, 0, 255), &config) >= 13);
        assert!(predict_total_rounds(Rgb::new(255, 0, 0), &config) >= 12);
    }
}
