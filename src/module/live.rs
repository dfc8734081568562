//! Provide Loop for the Live View.
//!

use std::thread::{self, JoinHandle};
use std::time::Duration;

use image::{DynamicImage, RgbaImage};

use crate::module::acquire::http::{FrameHttpSource, ThermalHttpSource};
use crate::module::acquire::{AcquireError, Feed};
use crate::module::overlay::{self, Viewport};
use crate::module::thermal::{self, ThermalGrid};
use crate::module::util::conf::{Config, Overlay, Theme};
use crate::module::util::init::SwinetrackProperty;

/// One thermal view: the current grid and background, and the last
/// composite rendered from them.
pub struct ThermalView {
    overlay: Overlay,
    theme: Theme,
    viewport: Viewport,
    grid: Option<ThermalGrid>,
    background: Option<DynamicImage>,
    frame: Option<RgbaImage>,
    dirty: bool,
}

impl ThermalView {
    pub fn new(overlay: Overlay, theme: Theme, viewport: Viewport) -> Self {
        Self {
            overlay: overlay.sanitized(),
            theme,
            viewport,
            grid: None,
            background: None,
            frame: None,
            dirty: true,
        }
    }

    pub fn from_config(conf: &Config) -> Self {
        Self::new(
            conf.overlay.clone(),
            conf.theme.clone(),
            Viewport {
                width: conf.display.width,
                height: conf.display.height,
            },
        )
    }

    /// Replace the grid wholesale. `None` clears the overlay.
    pub fn set_grid(&mut self, grid: Option<ThermalGrid>) {
        if let Some(grid) = &grid {
            let stats = grid.stats();
            log::debug!(
                "Thermal grid {}x{} min {:?} max {:?} avg {:?}",
                grid.width(),
                grid.height(),
                stats.min,
                stats.max,
                stats.avg
            );
        }
        self.grid = grid;
        self.dirty = true;
    }

    pub fn set_background(&mut self, background: DynamicImage) {
        self.background = Some(background);
        self.dirty = true;
    }

    pub fn grid(&self) -> Option<&ThermalGrid> {
        self.grid.as_ref()
    }

    /// Last rendered composite.
    pub fn frame(&self) -> Option<&RgbaImage> {
        self.frame.as_ref()
    }

    /// Whether the inputs changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run the pipeline on the current inputs.
    pub fn render(&mut self) -> &RgbaImage {
        let processed = self
            .grid
            .as_ref()
            .map(|grid| thermal::process(grid, self.overlay.interpolation_factor));
        if let Some(hot) = processed.as_ref().and_then(|p| p.hottest_value()) {
            log::debug!("Hotspot {}", overlay::hotspot_label(hot));
        }
        let composite = overlay::compose(
            self.background.as_ref(),
            processed.as_ref(),
            &self.overlay,
            &self.theme,
            self.viewport,
        );
        self.dirty = false;
        self.frame.insert(composite)
    }
}

/// A view with its feeds.
pub struct LiveSession {
    view: ThermalView,
    thermal: Feed<Option<ThermalGrid>>,
    frames: Feed<DynamicImage>,
}

impl LiveSession {
    pub fn new(
        view: ThermalView,
        thermal: Feed<Option<ThermalGrid>>,
        frames: Feed<DynamicImage>,
    ) -> Self {
        Self {
            view,
            thermal,
            frames,
        }
    }

    /// Build the HTTP feeds described by the config.
    ///
    /// With `push` the thermal payload is never polled.
    pub fn from_config(
        conf: &Config,
        push: Option<std::sync::mpsc::Receiver<Option<ThermalGrid>>>,
    ) -> Result<Self, AcquireError> {
        let thermal_source = if push.is_some() {
            None
        } else {
            Some(ThermalHttpSource::new(
                &conf.source.thermal_url,
                conf.source.timeout_ms,
            )?)
        };
        let thermal = Feed::select(
            push,
            thermal_source,
            Duration::from_millis(conf.overlay.refresh_interval),
        );
        if thermal.is_push() {
            log::info!("Thermal grids are pushed, polling disabled");
        }
        let frames = Feed::select(
            None,
            Some(FrameHttpSource::new(
                &conf.source.frame_url,
                conf.source.timeout_ms,
                conf.source.cache_bust,
            )?),
            Duration::from_millis(conf.source.frame_interval),
        );
        Ok(Self::new(ThermalView::from_config(conf), thermal, frames))
    }

    /// Apply whatever arrived and re-render when something changed.
    ///
    /// Returns `true` when a new composite was rendered. Never blocks.
    pub fn pump(&mut self) -> bool {
        if let Some(grid) = self.thermal.latest() {
            self.view.set_grid(grid);
        }
        if let Some(background) = self.frames.latest() {
            self.view.set_background(background);
        }
        if self.view.is_dirty() {
            self.view.render();
            true
        } else {
            false
        }
    }

    pub fn view(&self) -> &ThermalView {
        &self.view
    }
}

/// Start the render thread.
///
pub fn run(property: SwinetrackProperty) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut session = match LiveSession::from_config(&property.conf, None) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Can't start live view: {}", e);
                return;
            }
        };
        let tick = Duration::from_millis(property.conf.display.tick);
        log::info!(
            "Live view {}x{} started",
            property.conf.display.width,
            property.conf.display.height
        );
        loop {
            if session.pump() {
                if let Some(frame) = session.view().frame() {
                    if let Err(e) = frame.save(&property.path.img.composite) {
                        log::error!("Can't save composite: {}", e);
                    }
                }
            }
            // loop wait
            thread::sleep(tick);
        }
    })
}
