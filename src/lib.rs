//! SwineTrack: thermal overlay compositor for the barn camera.

pub mod module;
