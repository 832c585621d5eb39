//! Candidate perturbation in CIELAB space.
//!
//! Each comparison round needs two alternatives that sit near a target
//! perceptual distance from the current color: far enough apart to express a
//! preference, close enough to stay relevant. Offsets are drawn uniformly
//! inside per-channel half-widths that shrink geometrically with the round
//! index, and the half-widths adapt between attempts until the candidate
//! lands inside the tolerance band. The search is bounded and best-effort: a
//! candidate outside the band after the final attempt is used as-is.

use rand::Rng;

use crate::color::{delta_e76, Lab};
use crate::config::SessionConfig;

/// Round-zero half-width for the L* channel.
const BASE_L_HALF_WIDTH: f32 = 15.0;
/// Round-zero half-width for the a* and b* channels.
const BASE_AB_HALF_WIDTH: f32 = 20.0;
/// Applied when the sampled candidate fell short of the target distance.
const WIDEN_FACTOR: f32 = 1.1;
/// Applied when the sampled candidate overshot the target distance.
const NARROW_FACTOR: f32 = 0.9;

/// Per-channel sampling half-widths for one round. The a* and b* channels
/// share a width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfWidths {
    pub l: f32,
    pub ab: f32,
}

impl HalfWidths {
    /// Starting widths for a round: the base widths divided by
    /// `decay^round_index`, strictly decreasing for decay > 1.
    pub fn for_round(round_index: usize, base_decay_factor: f32) -> Self {
        let decay = base_decay_factor.powi(round_index as i32);
        Self {
            l: BASE_L_HALF_WIDTH / decay,
            ab: BASE_AB_HALF_WIDTH / decay,
        }
    }

    fn scaled(self, factor: f32) -> Self {
        Self {
            l: self.l * factor,
            ab: self.ab * factor,
        }
    }
}

/// Generate one candidate near `reference`.
///
/// Runs up to `max_generation_attempts` sampling rounds, accepting the first
/// candidate whose ΔE from the reference lies within `delta_tolerance` of
/// `target_delta`. Between attempts every half-width is widened ×1.1 when
/// the draw was too close or narrowed ×0.9 when it was too far. Never fails:
/// if no attempt lands in the band, the last clamped draw is returned.
///
/// The two alternatives of a round come from two independent calls; nothing
/// prevents them from landing close to each other.
pub fn generate_candidate<R: Rng>(
    reference: Lab,
    round_index: usize,
    config: &SessionConfig,
    rng: &mut R,
) -> Lab {
    let mut widths = HalfWidths::for_round(round_index, config.base_decay_factor);
    let mut candidate = reference;

    for _ in 0..config.max_generation_attempts {
        candidate = Lab {
            l: reference.l + rng.gen_range(-widths.l..=widths.l),
            a: reference.a + rng.gen_range(-widths.ab..=widths.ab),
            b: reference.b + rng.gen_range(-widths.ab..=widths.ab),
        }
        .clamped();

        let delta = delta_e76(candidate, reference);
        if (delta - config.target_delta).abs() < config.delta_tolerance {
            break;
        }

        widths = if delta < config.target_delta {
            widths.scaled(WIDEN_FACTOR)
        } else {
            widths.scaled(NARROW_FACTOR)
        };
    }

    candidate
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{generate_candidate, HalfWidths};
    use crate::color::{delta_e76, Lab};
    use crate::config::SessionConfig;

    #[test]
    fn half_widths_decay_monotonically() {
        let mut previous = HalfWidths::for_round(0, 1.5);
        assert!((previous.l - 15.0).abs() < 1e-6);
        assert!((previous.ab - 20.0).abs() < 1e-6);
        for round in 1..=15 {
            let widths = HalfWidths::for_round(round, 1.5);
            assert!(
                widths.l < previous.l && widths.ab < previous.ab,
                "widths must shrink at round {}",
                round
            );
            assert!(widths.l > 0.0 && widths.ab > 0.0);
            previous = widths;
        }
    }

    #[test]
    fn candidates_stay_inside_the_lab_domain() {
        let config = SessionConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let corners = [
            Lab::new(0.0, -128.0, -128.0),
            Lab::new(100.0, 127.0, 127.0),
            Lab::new(0.0, 127.0, -128.0),
            Lab::new(100.0, -128.0, 127.0),
        ];
        for reference in corners {
            for round in 0..4 {
                let candidate = generate_candidate(reference, round, &config, &mut rng);
                assert!((0.0..=100.0).contains(&candidate.l));
                assert!((-128.0..=127.0).contains(&candidate.a));
                assert!((-128.0..=127.0).contains(&candidate.b));
            }
        }
    }

    #[test]
    fn candidate_distance_is_bounded() {
        // The widths can only grow from (15, 20) by at most 1.1^(attempts-1),
        // so no candidate can end up further than the worst-case envelope.
        let config = SessionConfig::default();
        let envelope = {
            let growth = 1.1f32.powi(config.max_generation_attempts as i32 - 1);
            let l = 15.0 * growth;
            let ab = 20.0 * growth;
            (l * l + 2.0 * ab * ab).sqrt() + 1.0
        };

        let reference = Lab::new(50.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let candidate = generate_candidate(reference, 0, &config, &mut rng);
            assert!(delta_e76(candidate, reference) <= envelope);
        }
    }

    #[test]
    fn bounded_search_usually_hits_the_tolerance_band() {
        let config = SessionConfig::default();
        let reference = Lab::new(53.59, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(42);

        let mut inside = 0;
        let trials = 200;
        for _ in 0..trials {
            let candidate = generate_candidate(reference, 0, &config, &mut rng);
            let delta = delta_e76(candidate, reference);
            if (delta - config.target_delta).abs() < config.delta_tolerance {
                inside += 1;
            }
        }
        assert!(
            inside > trials * 3 / 4,
            "only {}/{} candidates landed in the tolerance band",
            inside,
            trials
        );
    }

    #[test]
    fn later_rounds_sample_tighter_offsets() {
        let config = SessionConfig::default();
        let reference = Lab::new(50.0, 10.0, -10.0);
        let mut rng = StdRng::seed_from_u64(3);

        // At round 12 the starting widths are ~0.12/0.15, and ten attempts of
        // ×1.1 growth cannot reach the target band, so the candidate stays
        // close to the reference.
        for _ in 0..50 {
            let candidate = generate_candidate(reference, 12, &config, &mut rng);
            assert!(delta_e76(candidate, reference) < config.target_delta);
        }
    }

    #[test]
    fn single_attempt_still_produces_a_candidate() {
        let mut config = SessionConfig::default();
        config.max_generation_attempts = 1;
        let reference = Lab::new(50.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(11);
        let candidate = generate_candidate(reference, 0, &config, &mut rng);
        assert!(candidate.l.is_finite());
        assert!((0.0..=100.0).contains(&candidate.l));
    }
}
