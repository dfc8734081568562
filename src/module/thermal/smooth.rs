//! 3x3 mean filter over finite samples.

use ndarray::{Array2, ArrayView2};

/// Replace every cell by the mean of the finite values in its 3x3
/// neighbourhood. Border cells use the neighbours that exist. A cell
/// without any finite neighbour keeps its own value.
pub fn smooth(src: ArrayView2<f64>) -> Array2<f64> {
    let (h, w) = src.dim();
    Array2::from_shape_fn((h, w), |(y, x)| {
        let mut sum = 0.0;
        let mut count = 0u32;
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let v = src[[ny, nx]];
                if v.is_finite() {
                    sum += v;
                    count += 1;
                }
            }
        }
        if count == 0 {
            src[[y, x]]
        } else {
            sum / count as f64
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn uniform_neighbourhood_is_unchanged() {
        let src = Array2::from_elem((5, 5), 21.5);
        let out = smooth(src.view());
        assert_eq!(out[[2, 2]], 21.5);
        assert!(out.iter().all(|v| *v == 21.5));

        let src = Array2::from_elem((3, 3), 0.1);
        let out = smooth(src.view());
        assert!((out[[1, 1]] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn corners_use_existing_neighbours() {
        let src = array![[0.0, 3.0], [6.0, 9.0]];
        let out = smooth(src.view());
        // Every 3x3 window of a 2x2 grid covers all four cells.
        assert!(out.iter().all(|v| *v == 4.5));

        let src = array![[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 9.0]];
        let out = smooth(src.view());
        assert_eq!(out[[0, 0]], 0.0);
        assert_eq!(out[[2, 2]], 9.0 / 4.0);
        assert_eq!(out[[1, 1]], 1.0);
        assert_eq!(out[[1, 2]], 9.0 / 6.0);
    }

    #[test]
    fn non_finite_sample_is_excluded() {
        let mut src = Array2::from_elem((3, 3), 12.0);
        src[[1, 1]] = f64::NAN;
        src[[0, 0]] = 20.0;
        let out = smooth(src.view());
        // The dropout takes the mean of its eight finite neighbours.
        assert_eq!(out[[1, 1]], (20.0 + 7.0 * 12.0) / 8.0);
        // Its neighbours average without it.
        assert_eq!(out[[0, 1]], (20.0 + 4.0 * 12.0) / 5.0);
        assert_eq!(out[[2, 2]], 12.0);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn isolated_dropout_region_stays_non_finite() {
        let src = Array2::from_elem((4, 4), f64::NAN);
        let out = smooth(src.view());
        assert!(out.iter().all(|v| v.is_nan()));

        let mut src = Array2::from_elem((1, 5), f64::NAN);
        src[[0, 4]] = 30.0;
        let out = smooth(src.view());
        assert!(out[[0, 0]].is_nan());
        assert!(out[[0, 1]].is_nan());
        assert!(out[[0, 2]].is_nan());
        assert_eq!(out[[0, 3]], 30.0);
        assert_eq!(out[[0, 4]], 30.0);
    }

    #[test]
    fn output_has_the_same_shape() {
        let src = Array2::from_elem((24, 32), 1.0);
        assert_eq!(smooth(src.view()).dim(), (24, 32));
        let empty = Array2::<f64>::zeros((0, 0));
        assert_eq!(smooth(empty.view()).dim(), (0, 0));
    }
}
