//! Animation clock and cycle-progress functions.
//!
//! Every animated quantity in the scene is a pure function of a single
//! elapsed-time value `t` (seconds). The driver (a timer, a test or a query
//! parameter) only has to supply `t`.

use std::time::Instant;

use crate::extensions::easing::Easing;

/// Wall-clock source for `t`.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    origin: Instant,
}

impl AnimationClock {
    /// Start a clock at `t = 0` now.
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock started.
    pub fn elapsed(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Fraction of the current cycle, in [0, 1).
/// A non-positive period never advances.
pub fn cycle_fraction(t: f64, period: f64) -> f64 {
    if period <= 0.0 || !t.is_finite() {
        return 0.0;
    }
    let f = t.rem_euclid(period) / period;
    // rem_euclid can round up to exactly `period` for tiny negative t
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Progress along an orbit path at time `t`.
///
/// Two keyframe segments: ease-out leaving perihelion for the first half of
/// the cycle, ease-in coming back for the second half. This only mimics the
/// speed-up near perihelion; it is not Keplerian motion and does not solve
/// for the true anomaly.
pub fn orbit_progress(t: f64, period: f64) -> f64 {
    let u = cycle_fraction(t, period);
    if u < 0.5 {
        0.5 * Easing::EaseOut.apply(u * 2.0)
    } else {
        0.5 + 0.5 * Easing::EaseIn.apply(u * 2.0 - 1.0)
    }
}

/// Progress of a moon along its own path: linear, no easing.
pub fn moon_progress(t: f64, period: f64) -> f64 {
    cycle_fraction(t, period)
}

/// Rotation in degrees of something spinning once per `period` seconds.
pub fn spin_angle(t: f64, period: f64) -> f64 {
    cycle_fraction(t, period) * 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_fraction_wraps() {
        assert_eq!(cycle_fraction(0.0, 10.0), 0.0);
        assert!((cycle_fraction(12.5, 10.0) - 0.25).abs() < 1e-12);
        assert!((cycle_fraction(-2.5, 10.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_period_never_advances() {
        assert_eq!(cycle_fraction(42.0, 0.0), 0.0);
        assert_eq!(orbit_progress(42.0, 0.0), 0.0);
    }

    #[test]
    fn orbit_progress_is_periodic() {
        let period = 30.0;
        for i in 0..50 {
            let t = i as f64 * 0.73;
            let a = orbit_progress(t, period);
            let b = orbit_progress(t + period, period);
            assert!((a - b).abs() < 1e-9, "t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn orbit_progress_strictly_increases_within_each_half() {
        let period = 30.0;
        let steps = 300;
        let mut prev = orbit_progress(0.0, period);
        for i in 1..steps {
            let t = period * i as f64 / steps as f64;
            let p = orbit_progress(t, period);
            assert!(p > prev, "not increasing at t={t}: {prev} -> {p}");
            prev = p;
        }
    }

    #[test]
    fn orbit_progress_is_continuous_at_half_period() {
        let period = 20.0;
        let before = orbit_progress(10.0 - 1e-6, period);
        let after = orbit_progress(10.0, period);
        assert!((after - 0.5).abs() < 1e-9);
        assert!((after - before).abs() < 1e-4);
    }

    #[test]
    fn orbit_progress_eases_away_from_perihelion() {
        // Ease-out: more than a linear share of the path is covered early.
        let period = 40.0;
        assert!(orbit_progress(5.0, period) > 0.125);
        // Ease-in: less than a linear share right after the midpoint.
        assert!(orbit_progress(25.0, period) < 0.625);
    }

    #[test]
    fn spin_angle_full_turn() {
        assert!((spin_angle(60.0, 120.0) - 180.0).abs() < 1e-9);
        assert_eq!(spin_angle(120.0, 120.0), 0.0);
    }
}
