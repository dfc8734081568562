//! This module is responsible for preparing the resources needed by the application, such as directories, configurations, logs, etc.
//!

pub mod resource {
    use super::SwinetrackProperty;

    /// Initialize the application resources and return a SwinetrackProperty instance containing paths and configurations.
    ///
    pub fn init() -> SwinetrackProperty {
        // Prepare the app data directory
        let paths =
            crate::module::util::path::dir::create_app_sub_dir().expect("Can't prepare dirs.");

        // Load the app configuration file
        let conf =
            crate::module::util::conf::toml::load(&paths.dir.data).expect("Can't load config.");

        SwinetrackProperty { path: paths, conf }
    }
}

/// This struct represents the properties of the app, such as paths and configurations.
///
#[derive(Debug, Clone)]
pub struct SwinetrackProperty {
    pub path: crate::module::util::path::SwinetrackPath, // The paths of the app resources
    pub conf: crate::module::util::conf::Config,         // The configurations of the app
}
