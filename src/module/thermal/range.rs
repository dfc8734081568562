//! Range finder and hotspot locator.

use ndarray::ArrayView2;

/// Result of an interior scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeScan {
    pub min: f64,
    pub max: f64,
    /// Row-major index of the first maximum.
    pub hottest: Option<usize>,
}

impl RangeScan {
    fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            hottest: None,
        }
    }

    /// No finite value was found.
    pub fn is_empty(&self) -> bool {
        self.hottest.is_none()
    }
}

/// Edge margin in display pixels for a given interpolation factor.
pub fn margin_for(factor: f64, cells: f64) -> usize {
    let margin = (cells * factor).round();
    if margin.is_finite() && margin > 0.0 {
        margin as usize
    } else {
        0
    }
}

/// Scan the finite values inset by `margin` from every edge.
///
/// A grid not larger than `2 * margin` in either dimension has no interior.
pub fn scan_interior(values: ArrayView2<f64>, margin: usize) -> RangeScan {
    let (h, w) = values.dim();
    let mut scan = RangeScan::empty();
    if w <= 2 * margin || h <= 2 * margin {
        return scan;
    }
    for y in margin..h - margin {
        for x in margin..w - margin {
            let v = values[[y, x]];
            if !v.is_finite() {
                continue;
            }
            if v < scan.min {
                scan.min = v;
            }
            if v > scan.max {
                scan.max = v;
                scan.hottest = Some(y * w + x);
            }
        }
    }
    scan
}
