//! This module contains all the sub-modules of the project.

pub mod acquire; // Acquisition module: Polls the thermal payload and the optical frame.
pub mod define; // Definition module: Contains definitions and constants used throughout the project.
pub mod live; // Live module: Runs the render loop.
pub mod overlay; // Overlay module: Composites the thermal tiles over the frame.
pub mod thermal; // Thermal module: Grid model and processing pipeline.
pub mod util; // Utility module: Provides various utility functions and helpers.
