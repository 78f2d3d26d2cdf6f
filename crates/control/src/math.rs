//! Scalar helpers shared by every environment.

use crate::EnvError;

/// A stream of uniform draws in `[0, 1)`.
///
/// Every operation that needs randomness receives the stream explicitly, so
/// a seeded implementation reproduces a trajectory exactly and independent
/// episodes never share hidden generator state.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

impl RandomSource for fastrand::Rng {
    fn next_f32(&mut self) -> f32 {
        self.f32()
    }
}

/// Uniform draw from `[min, max)`.
pub fn random_range(rng: &mut dyn RandomSource, min: f32, max: f32) -> f32 {
    debug_assert!(max >= min, "random_range requires max >= min");
    rng.next_f32() * (max - min) + min
}

/// Bounds `value` to `[min, max]`.
#[must_use]
pub fn clip(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "clip requires min <= max");
    min.max(max.min(value))
}

/// Maps `value` to its representative modulo `max - min` inside `[min, max]`.
///
/// Values already in range are returned unchanged. Otherwise a whole number
/// of range widths is added or subtracted in one go; for an excess of less
/// than one width this is exactly `value - (max - min)` (or `+`). Non-finite
/// input yields a non-finite result.
#[must_use]
pub fn wrap(value: f32, min: f32, max: f32) -> f32 {
    let width = max - min;
    if value > max {
        let turns = ((value - max) / width).ceil();
        (value - turns * width).clamp(min, max)
    } else if value < min {
        let turns = ((min - value) / width).ceil();
        (value + turns * width).clamp(min, max)
    } else {
        value
    }
}

/// Index of the first maximum. Later slots only win with a strictly larger
/// score, so ties resolve to the lowest index.
#[must_use]
pub fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    let mut best_score = match scores.first() {
        Some(&s) => s,
        None => return 0,
    };
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > best_score {
            best_score = s;
            best = i;
        }
    }
    best
}

/// `true` for strictly positive values; NaN is not positive.
pub(crate) fn is_positive(value: f32) -> bool {
    value > 0.0
}

/// `true` for values `>= 0`; NaN is rejected.
pub(crate) fn is_non_negative(value: f32) -> bool {
    value >= 0.0
}

/// Fails with [`EnvError::NonFinite`] if any value is NaN or infinite.
pub(crate) fn ensure_finite(values: &[f32], what: &'static str) -> Result<(), EnvError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(EnvError::NonFinite(what))
    }
}

/// Fails with [`EnvError::NonFinite`] unless `value` is finite and non-zero.
pub(crate) fn ensure_nonzero(value: f32, what: &'static str) -> Result<f32, EnvError> {
    if value.is_finite() && value != 0.0 {
        Ok(value)
    } else {
        Err(EnvError::NonFinite(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn next_f32(&mut self) -> f32 {
            self.0
        }
    }

    #[test]
    fn random_range_is_linear_in_the_draw() {
        assert_eq!(random_range(&mut Fixed(0.0), -2.0, 2.0), -2.0);
        assert_eq!(random_range(&mut Fixed(0.5), -2.0, 2.0), 0.0);
        assert_eq!(random_range(&mut Fixed(0.25), 1.0, 1.0), 1.0);
    }

    #[test]
    fn random_range_stays_in_half_open_interval() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, -0.1, 0.1);
            assert!((-0.1..0.1).contains(&v));
        }
    }

    #[test]
    fn clip_bounds_both_sides() {
        assert_eq!(clip(5.0, -1.0, 1.0), 1.0);
        assert_eq!(clip(-5.0, -1.0, 1.0), -1.0);
        assert_eq!(clip(0.25, -1.0, 1.0), 0.25);
    }

    #[test]
    fn wrap_leaves_in_range_values_alone() {
        assert_eq!(wrap(PI, -PI, PI), PI);
        assert_eq!(wrap(-PI, -PI, PI), -PI);
        assert_eq!(wrap(1.0, -PI, PI), 1.0);
    }

    #[test]
    fn wrap_single_turn_matches_one_subtraction() {
        let v = PI + 0.5;
        assert_eq!(wrap(v, -PI, PI), v - 2.0 * PI);
        let v = -PI - 0.5;
        assert_eq!(wrap(v, -PI, PI), v + 2.0 * PI);
    }

    #[test]
    fn wrap_handles_many_turns() {
        let v = wrap(1.0 + 2.0 * PI * 1000.0, -PI, PI);
        assert!((-PI..=PI).contains(&v));
        assert!((v - 1.0).abs() < 1e-2);
        let v = wrap(-1.0e9, -PI, PI);
        assert!((-PI..=PI).contains(&v));
    }

    #[test]
    fn wrap_propagates_nan() {
        assert!(wrap(f32::NAN, -PI, PI).is_nan());
    }

    #[test]
    fn argmax_takes_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.9, 0.3]), 1);
        assert_eq!(argmax(&[0.5, 0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.7, 0.7]), 1);
        assert_eq!(argmax(&[-1.0, -2.0]), 0);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn nonzero_check_rejects_zero_and_nan() {
        assert!(ensure_nonzero(0.0, "x").is_err());
        assert!(ensure_nonzero(f32::NAN, "x").is_err());
        assert_eq!(ensure_nonzero(2.0, "x").unwrap(), 2.0);
    }
}
