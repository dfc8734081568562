//! This module defines the main functionality of SwineTrack, a thermal overlay viewer for barn cameras.

use swinetracklib::module::define; // Import the define module that contains constants and types
use swinetracklib::module::live; // Import the live view loop
use swinetracklib::module::util::init::resource::init; // Import the resource initialization function

// The main function of SwineTrack
pub fn main() {
    // Prepare the resources by initializing the property struct
    let property = init();

    // Initialize the logging system with the data directory and the system name
    init_log(
        property.path.dir.data.as_str(),
        define::system::NAME,
        &property.conf.system.log_level,
    );
    log::info!("Starting SwineTrack...");

    // Start the render thread that polls the sources and writes the composite
    let live_handler = live::run(property);

    // Wait for the render thread to finish before exiting the main function
    let _ = live_handler.join();
}

/// Parse a level name from the config, falling back to Info.
fn level_filter(level: &str) -> log::LevelFilter {
    level.trim().parse().unwrap_or(log::LevelFilter::Info)
}

/// This function initializes the logger system using the log4rs crate.
///
/// # Arguments
/// * `dir` - The directory where the log file will be stored
/// * `name` - The name of the logger and the log file
/// * `level` - Level name as written in the config, e.g. `INFO`
///
/// # Log Example
/// ```
/// log::debug!("Debug Message");
/// log::info!("Info Message");
/// ```
fn init_log(dir: &str, name: &str, level: &str) {
    use log4rs::append::file::FileAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;
    use swinetracklib::module::util::path::join;

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{h({d} - {l}: {m}{n})}")))
        .build(join(&[
            dir,
            define::path::LOG_DIR,
            &format!("{}.log", name),
        ]))
        .unwrap();

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(
            Root::builder()
                .appender("logfile")
                .build(level_filter(level)),
        )
        .unwrap();
    log4rs::init_config(config).unwrap();
}
