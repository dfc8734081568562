//! Module for Constants and Paths Definitions
//!
//! This module defines various constants and paths used throughout the application.

/// System Constants
pub mod system {
    /// Name of the system
    pub const NAME: &str = "swinetrack";
}

/// File Paths
pub mod path {

    // Persistent Data Directory
    pub const PERSISTENT_DIR: &str = "/data/";

    // Ephemeral Data Directory
    pub const EPHEMERAL_DIR: &str = "/tmp/";

    // Image Directory
    pub const IMG_DIR: &str = "img";

    // Log Directory
    pub const LOG_DIR: &str = "log";

    // Configuration File
    pub const CONF_FILE: &str = "conf.toml";

    // Last Rendered Composite
    pub const LAST_COMPOSITE: &str = "composite.png";
}

/// Thermal pipeline constants
pub mod thermal {
    /// Guards the colour normalisation against a zero-width range.
    pub const EPSILON: f64 = 1e-6;

    /// Edge margin of the hotspot search, in source cells.
    /// Scaled by the interpolation factor.
    pub const EDGE_MARGIN_CELLS: f64 = 3.0;

    /// Largest grid accepted from a payload, and largest upsampled grid.
    pub const MAX_CELLS: usize = 4096 * 4096;

    /// Upper bound of the interpolation factor.
    pub const MAX_INTERPOLATION_FACTOR: f64 = 16.0;
}
