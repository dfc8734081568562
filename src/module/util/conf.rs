//! Config Handler.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::module::define;

/// Errors raised while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] ::toml::de::Error),
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] ::toml::ser::Error),
}

/// Provides TOML config file handling.
pub mod toml {

    use super::{ConfError, DEFAULT_CONFIG};
    use crate::module::define;
    use std::fs::File;
    use std::io::prelude::*;
    use std::path::Path;

    /// Loads a configuration file from the given directory.
    /// If not found, generates a default config file.
    ///
    /// # Arguments
    ///
    /// * `dir` - The directory where the configuration file is located or should be created.
    ///
    pub fn load(dir: &str) -> Result<super::Config, ConfError> {
        // Check if the config file exists
        let path = Path::new(dir).join(define::path::CONF_FILE);

        if !path.is_file() {
            // Create the default config if it doesn't exist
            let config: super::Config = toml::from_str(DEFAULT_CONFIG)?;
            save(dir, &config)?;
            log::info!("Default config written to {}", path.display());
        }

        // Load the config
        let conf_str = std::fs::read_to_string(&path)?;
        let conf: super::Config = toml::from_str(&conf_str)?;
        Ok(conf.sanitized())
    }

    /// Saves a configuration file to the given directory.
    ///
    /// # Arguments
    ///
    /// * `dir` - The directory where the configuration file should be saved.
    /// * `conf` - The configuration data to be saved.
    ///
    pub fn save(dir: &str, conf: &super::Config) -> Result<(), ConfError> {
        let toml_str = toml::to_string(conf)?;
        let path = crate::module::util::path::join(&[dir, define::path::CONF_FILE]);
        let mut file = File::create(path)?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }
}

/// Represents the configuration data structure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub system: System,
    pub source: Source,
    pub overlay: Overlay,
    pub display: Display,
    pub theme: Theme,
}

/// Represents system-related configuration parameters.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct System {
    pub log_level: String,
}

/// Represents where the thermal payload and the optical frame come from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Source {
    pub thermal_url: String,
    pub frame_url: String,
    pub timeout_ms: u64,
    pub frame_interval: u64,
    pub cache_bust: bool,
}

/// Represents overlay-related configuration parameters.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Overlay {
    pub overlay_opacity: f64,
    pub refresh_interval: u64,
    pub interpolation_factor: f64,
    pub pixel_skip: usize,
}

/// Represents the output viewport.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Display {
    pub width: u32,
    pub height: u32,
    pub tick: u64,
}

/// Colours and marker sizes used by the renderer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Theme {
    pub backdrop: [u8; 3],
    pub crosshair: [u8; 3],
    pub label: [u8; 3],
    pub crosshair_arm: u32,
    pub label_scale: u32,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            overlay_opacity: 0.5,
            refresh_interval: 1000,
            interpolation_factor: 2.0,
            pixel_skip: 1,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            backdrop: [0, 0, 0],
            crosshair: [255, 255, 255],
            label: [255, 255, 255],
            crosshair_arm: 6,
            label_scale: 2,
        }
    }
}

impl Overlay {
    /// Clamp every option into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.overlay_opacity = if self.overlay_opacity.is_finite() {
            self.overlay_opacity.clamp(0.0, 1.0)
        } else {
            Overlay::default().overlay_opacity
        };
        self.interpolation_factor = if self.interpolation_factor.is_finite() {
            self.interpolation_factor
                .clamp(1.0, define::thermal::MAX_INTERPOLATION_FACTOR)
        } else {
            1.0
        };
        self.pixel_skip = self.pixel_skip.max(1);
        self
    }
}

impl Config {
    /// Returns a copy whose values are all within their valid ranges.
    pub fn sanitized(mut self) -> Self {
        self.overlay = self.overlay.sanitized();
        self.display.width = self.display.width.max(1);
        self.display.height = self.display.height.max(1);
        self.display.tick = self.display.tick.max(1);
        self.theme.label_scale = self.theme.label_scale.max(1);
        self
    }
}

// Default configuration data in TOML format
const DEFAULT_CONFIG: &str = r#"
[system]
  log_level = 'INFO' # Log level ('DEBUG', 'INFO', 'WARN', 'ERROR')

[source]
  thermal_url = 'http://localhost:8080/frames-live/pen-01/thermal.json' # Thermal grid payload
  frame_url = 'http://localhost:8080/frames-live/pen-01/current.jpg' # Optical frame
  timeout_ms = 5000 # HTTP timeout
  frame_interval = 1000 # Optical frame refresh in ms (0 fetches once)
  cache_bust = true # Append cb=<epoch ms> to the frame url

[overlay]
  overlay_opacity = 0.5 # Alpha of the coloured overlay (0 - 1)
  refresh_interval = 1000 # Thermal payload refresh in ms (0 disables polling)
  interpolation_factor = 2.0 # Upsampling multiplier (>= 1)
  pixel_skip = 1 # Draw every n-th processed cell

[display]
  width = 640 # Viewport width
  height = 480 # Viewport height
  tick = 100 # Render loop period in ms

[theme]
  backdrop = [0, 0, 0] # Letterbox colour
  crosshair = [255, 255, 255] # Hotspot marker colour
  label = [255, 255, 255] # Hotspot label colour
  crosshair_arm = 6 # Half length of the marker segments in px
  label_scale = 2 # Label glyph scale
"#;

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    #[test]
    fn run_load() {
        let dir = "/tmp/swinetracktest/run_load/";
        let _ = fs::remove_dir_all(Path::new(dir));
        fs::create_dir_all(Path::new(dir)).unwrap();
        let res = toml::load(dir).unwrap();
        assert_eq!(res.system.log_level, "INFO");
        assert_eq!(res.overlay, Overlay::default());
        assert_eq!(res.theme, Theme::default());
        // The default file has been written.
        assert!(Path::new(dir).join("conf.toml").is_file());
    }

    #[test]
    fn save_and_reload() {
        let dir = "/tmp/swinetracktest/save_and_reload/";
        fs::create_dir_all(Path::new(dir)).unwrap();
        let mut conf = toml::load(dir).unwrap();
        conf.overlay.refresh_interval = 0;
        conf.display.width = 320;
        toml::save(dir, &conf).unwrap();
        let reloaded = toml::load(dir).unwrap();
        assert_eq!(reloaded.overlay.refresh_interval, 0);
        assert_eq!(reloaded.display.width, 320);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = "/tmp/swinetracktest/broken_file/";
        fs::create_dir_all(Path::new(dir)).unwrap();
        fs::write(Path::new(dir).join("conf.toml"), "[system\nlog_level=").unwrap();
        assert!(matches!(toml::load(dir), Err(ConfError::Parse(_))));
    }

    #[test]
    fn sanitize_overlay() {
        let overlay = Overlay {
            overlay_opacity: 1.7,
            refresh_interval: 0,
            interpolation_factor: 0.25,
            pixel_skip: 0,
        }
        .sanitized();
        assert_eq!(overlay.overlay_opacity, 1.0);
        assert_eq!(overlay.interpolation_factor, 1.0);
        assert_eq!(overlay.pixel_skip, 1);

        let overlay = Overlay {
            overlay_opacity: f64::NAN,
            interpolation_factor: f64::INFINITY,
            ..Overlay::default()
        }
        .sanitized();
        assert_eq!(overlay.overlay_opacity, 0.5);
        assert_eq!(overlay.interpolation_factor, 1.0);

        let overlay = Overlay {
            interpolation_factor: 1e9,
            ..Overlay::default()
        }
        .sanitized();
        assert_eq!(overlay.interpolation_factor, 16.0);
    }
}
