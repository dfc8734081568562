//! Bilinear upsampling.
//!
//! Non-finite source cells don't contribute: the remaining weights are
//! re-normalised, and a target pixel whose finite weights sum to zero stays
//! non-finite.

use ndarray::{Array2, ArrayView2};

/// Fractional source coordinate of target index `i`.
fn source_coord(i: usize, source_len: usize, target_len: usize) -> f64 {
    if target_len <= 1 {
        0.0
    } else {
        i as f64 * (source_len - 1) as f64 / (target_len - 1) as f64
    }
}

/// Upsample `src` to `target_w` x `target_h`.
pub fn bilinear(src: ArrayView2<f64>, target_w: usize, target_h: usize) -> Array2<f64> {
    let (sh, sw) = src.dim();
    if sw == 0 || sh == 0 {
        return Array2::from_elem((target_h, target_w), f64::NAN);
    }
    Array2::from_shape_fn((target_h, target_w), |(y, x)| {
        let fx = source_coord(x, sw, target_w);
        let fy = source_coord(y, sh, target_h);
        sample(&src, fx, fy)
    })
}

fn sample(src: &ArrayView2<f64>, fx: f64, fy: f64) -> f64 {
    let (sh, sw) = src.dim();
    let x0 = (fx.floor() as usize).min(sw - 1);
    let y0 = (fy.floor() as usize).min(sh - 1);
    let x1 = (x0 + 1).min(sw - 1);
    let y1 = (y0 + 1).min(sh - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let a = src[[y0, x0]];
    let b = src[[y0, x1]];
    let c = src[[y1, x0]];
    let d = src[[y1, x1]];

    if a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite() {
        let top = a + (b - a) * tx;
        let bottom = c + (d - c) * tx;
        return top + (bottom - top) * ty;
    }

    let corners = [
        (a, (1.0 - tx) * (1.0 - ty)),
        (b, tx * (1.0 - ty)),
        (c, (1.0 - tx) * ty),
        (d, tx * ty),
    ];
    let mut sum = 0.0;
    let mut weight = 0.0;
    for (v, w) in corners {
        if v.is_finite() && w > 0.0 {
            sum += v * w;
            weight += w;
        }
    }
    if weight > 0.0 {
        sum / weight
    } else {
        f64::NAN
    }
}
