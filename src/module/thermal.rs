//! Thermal grid processing.
//!
//! A [`ThermalGrid`] arrives from a data source, is smoothed, upsampled and
//! scanned into a [`ProcessedGrid`] which the overlay renderer draws.
//! Both are immutable once built and a new pair is derived for every frame.

pub mod colorize;
pub mod range;
pub mod smooth;
pub mod upsample;

use ndarray::{Array2, ArrayView2};
use serde::Deserialize;
use serde_json::Value;

use crate::module::define;

/// Raw payload as served by the backend.
///
/// Either `data` or `pixelData` carries the samples. Entries that are not
/// numbers are kept as non-finite samples.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThermalPayload {
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub data: Option<Vec<Value>>,
    #[serde(rename = "pixelData")]
    pub pixel_data: Option<Vec<Value>>,
    #[serde(rename = "tMin")]
    pub t_min: Option<f64>,
    #[serde(rename = "tMax")]
    pub t_max: Option<f64>,
    #[serde(rename = "tAvg")]
    pub t_avg: Option<f64>,
}

impl ThermalPayload {
    /// Parse a payload from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Normalise into a grid.
    ///
    /// Returns `None` when the dimensions are missing or invalid, or when
    /// neither sample array is present. The caller then shows the
    /// background alone.
    pub fn into_grid(self) -> Option<ThermalGrid> {
        let width = dimension(self.w)?;
        let height = dimension(self.h)?;
        let raw = self.data.or(self.pixel_data)?;
        let samples = raw
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect();
        let grid = ThermalGrid::new(width, height, samples)?;
        Some(grid.with_stats(self.t_min, self.t_max, self.t_avg))
    }
}

fn dimension(v: Option<f64>) -> Option<usize> {
    match v {
        Some(v) if v.is_finite() && v >= 1.0 => Some(v as usize),
        _ => None,
    }
}

/// Min / max / average of a grid. `None` when nothing finite is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

/// Low resolution temperature samples, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalGrid {
    samples: Array2<f64>,
    min: Option<f64>,
    max: Option<f64>,
    avg: Option<f64>,
}

impl ThermalGrid {
    /// Build a grid from row-major samples.
    ///
    /// A sample vector of the wrong length is truncated, or padded with
    /// non-finite samples, to `width * height`. Zero dimensions, or more than
    /// `define::thermal::MAX_CELLS` cells, yield `None`.
    pub fn new(width: usize, height: usize, mut samples: Vec<f64>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let len = width.checked_mul(height)?;
        if len > define::thermal::MAX_CELLS {
            log::warn!("Thermal grid {}x{} is too large", width, height);
            return None;
        }
        if samples.len() != len {
            log::debug!(
                "Thermal samples length {} doesn't match {}x{}",
                samples.len(),
                width,
                height
            );
            samples.resize(len, f64::NAN);
        }
        let samples = Array2::from_shape_vec((height, width), samples).ok()?;
        Some(Self {
            samples,
            min: None,
            max: None,
            avg: None,
        })
    }

    /// Attach precomputed statistics. Non-finite values are ignored.
    pub fn with_stats(mut self, min: Option<f64>, max: Option<f64>, avg: Option<f64>) -> Self {
        self.min = min.filter(|v| v.is_finite());
        self.max = max.filter(|v| v.is_finite());
        self.avg = avg.filter(|v| v.is_finite());
        self
    }

    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    /// Samples as a `(height, width)` view.
    pub fn samples(&self) -> ArrayView2<'_, f64> {
        self.samples.view()
    }

    /// Sample at `(x, y)`, if inside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.samples.get((y, x)).copied()
    }

    /// Statistics, preferring the payload's values and computing the
    /// missing ones over the finite samples.
    pub fn stats(&self) -> GridStats {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in self.samples.iter().copied().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }
        let computed = |v: f64| if count > 0 { Some(v) } else { None };
        GridStats {
            min: self.min.or(computed(min)),
            max: self.max.or(computed(max)),
            avg: self.avg.or(computed(sum / count.max(1) as f64)),
        }
    }
}

/// A grid ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedGrid {
    pub display_width: usize,
    pub display_height: usize,
    /// Smoothed then upsampled values, row-major.
    pub values: Vec<f64>,
    /// Colour scale. Infinite when the grid has no finite value at all.
    pub observed_min: f64,
    pub observed_max: f64,
    /// Index of the hottest interior value.
    pub hottest_index: Option<usize>,
    /// Edge margin excluded from the hotspot search.
    pub margin: usize,
}

impl ProcessedGrid {
    /// Hotspot position in display coordinates.
    pub fn hottest_xy(&self) -> Option<(usize, usize)> {
        self.hottest_index
            .map(|i| (i % self.display_width, i / self.display_width))
    }

    pub fn hottest_value(&self) -> Option<f64> {
        self.hottest_index.map(|i| self.values[i])
    }

    pub fn value(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.display_width && y < self.display_height {
            Some(self.values[y * self.display_width + x])
        } else {
            None
        }
    }

    /// Whether anything would be drawn.
    pub fn has_finite(&self) -> bool {
        self.observed_min <= self.observed_max
    }
}

/// Upsampled size of one grid dimension.
pub fn display_dim(source: usize, factor: f64) -> usize {
    let scaled = (source as f64 * factor).round();
    if scaled.is_finite() && scaled >= source as f64 {
        scaled as usize
    } else {
        source
    }
}

/// Factor in `[1, MAX_INTERPOLATION_FACTOR]`, reduced further so the
/// upsampled grid stays within `MAX_CELLS`.
fn clamp_factor(factor: f64, cells: usize) -> f64 {
    let factor = if factor.is_finite() {
        factor.clamp(1.0, define::thermal::MAX_INTERPOLATION_FACTOR)
    } else {
        1.0
    };
    let room = (define::thermal::MAX_CELLS as f64 / cells.max(1) as f64).sqrt();
    factor.min(room.floor()).max(1.0)
}

/// Run the whole pipeline on one grid.
///
/// The colour scale comes from the interior region like the hotspot. When
/// the interior holds nothing finite it falls back to the whole grid so
/// the overlay is still drawn, without a hotspot.
pub fn process(grid: &ThermalGrid, interpolation_factor: f64) -> ProcessedGrid {
    let factor = clamp_factor(interpolation_factor, grid.width() * grid.height());
    let display_width = display_dim(grid.width(), factor);
    let display_height = display_dim(grid.height(), factor);

    let smoothed = smooth::smooth(grid.samples());
    let upsampled = upsample::bilinear(smoothed.view(), display_width, display_height);

    let margin = range::margin_for(factor, define::thermal::EDGE_MARGIN_CELLS);
    let interior = range::scan_interior(upsampled.view(), margin);
    let (observed_min, observed_max) = if interior.is_empty() {
        let whole = range::scan_interior(upsampled.view(), 0);
        (whole.min, whole.max)
    } else {
        (interior.min, interior.max)
    };

    ProcessedGrid {
        display_width,
        display_height,
        values: upsampled.into_raw_vec(),
        observed_min,
        observed_max,
        hottest_index: interior.hottest,
        margin,
    }
}
