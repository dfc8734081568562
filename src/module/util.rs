//! This module provides miscellaneous utilities.

pub mod common; // HTTP and time helpers
pub mod conf; // Configuration module
pub mod init; // Initialization module
pub mod path; // Path module
