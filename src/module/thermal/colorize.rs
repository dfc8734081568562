//! Temperature to colour mapping.
//!
//! Uses the quadratic thermal gradient: red rises linearly and saturates
//! early, green rises with `t²`, blue falls with `(1 - t)²`. Cool values are
//! blue, hot values are yellow.

use image::Rgb;

use crate::module::define::thermal::EPSILON;

/// Colour at `t = 0`.
pub const COOL: Rgb<u8> = Rgb([0, 0, 255]);
/// Colour at `t = 1`.
pub const HOT: Rgb<u8> = Rgb([255, 255, 0]);

/// Position of `v` within `[min, max]`, clamped to `[0, 1]`.
///
/// A zero-width range maps everything to the middle of the gradient.
pub fn normalise(v: f64, min: f64, max: f64) -> f64 {
    if !(max - min > 0.0) {
        return 0.5;
    }
    ((v - min) / (max - min + EPSILON)).clamp(0.0, 1.0)
}

fn channel(x: f64) -> u8 {
    (255.0 * x.clamp(0.0, 1.0)).round() as u8
}

/// Gradient colour at `t`.
pub fn gradient(t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Rgb([
        channel(1.7 * t),
        channel(t * t),
        channel((1.0 - t) * (1.0 - t)),
    ])
}

/// Colour of temperature `v` on the scale `[min, max]`.
pub fn colorize(v: f64, min: f64, max: f64) -> Rgb<u8> {
    gradient(normalise(v, min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn endpoints() {
        assert_eq!(colorize(20.0, 20.0, 40.0), COOL);
        assert_eq!(colorize(40.0, 20.0, 40.0), HOT);
        assert_eq!(colorize(-5.0, 20.0, 40.0), COOL);
        assert_eq!(colorize(80.0, 20.0, 40.0), HOT);
    }

    #[test]
    fn degenerate_range_is_mid_gradient() {
        let mid = gradient(0.5);
        assert_eq!(colorize(10.0, 10.0, 10.0), mid);
        assert_eq!(mid, Rgb([217, 64, 64]));
    }

    #[test]
    fn deterministic() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let min = rng.gen_range(-10.0..30.0);
            let max = min + rng.gen_range(0.0..20.0);
            let v = rng.gen_range(-20.0..60.0);
            assert_eq!(colorize(v, min, max), colorize(v, min, max));
        }
    }

    #[test]
    fn monotonic_warmth() {
        let mut last = gradient(0.0);
        for i in 1..=100 {
            let c = gradient(i as f64 / 100.0);
            assert!(c[0] >= last[0]);
            assert!(c[1] >= last[1]);
            assert!(c[2] <= last[2]);
            last = c;
        }
    }
}
