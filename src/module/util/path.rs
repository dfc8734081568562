//! Path Operations Module
//!
//! This module handles path operations for directories and files.

use std::path::PathBuf;

/// Join Paths
///
/// This function takes a slice of strings as input and joins them into a single path string.
/// It uses the PathBuf type to handle platform-specific separators and conversions.
/// Non UTF-8 components are replaced lossily.
pub fn join(paths: &[&str]) -> String {
    let mut path: PathBuf = PathBuf::new();
    for p in paths {
        path.push(p);
    }
    path.to_string_lossy().into_owned()
}

pub mod dir {
    //! Directory Operations Submodule
    //!
    //! This submodule provides functions for directory operations.

    use std::fs;
    use std::io;
    use std::path::Path;

    use super::{SwinetrackDir, SwinetrackImg, SwinetrackPath};
    use crate::module::define;

    /// Create Directory from Path List
    ///
    /// This function takes a slice of strings as input and creates a directory with the joined path.
    /// It returns `Some(path)` if the directory creation succeeds, or `None` if it fails.
    pub fn create_dir_from_path_list(paths: &[&str]) -> Option<String> {
        let path = super::join(paths);
        match fs::create_dir_all(Path::new(&path)) {
            Ok(_) => Some(path),
            Err(e) => {
                log::warn!("Can't create {}: {}", path, e);
                None
            }
        }
    }

    /// Create Subdirectory in Either Directory
    ///
    /// Uses `dir1` as the parent when it exists and the subdirectory can be created there,
    /// otherwise falls back to `dir2`.
    pub fn create_subdir_in_either_dir(dir1: &str, dir2: &str, name: &str) -> Option<String> {
        if Path::new(dir1).is_dir() {
            if let Some(path) = create_dir_from_path_list(&[dir1, name]) {
                return Some(path);
            }
        }
        create_dir_from_path_list(&[dir2, name])
    }

    fn not_created(what: &str) -> io::Error {
        io::Error::new(io::ErrorKind::Other, format!("Can't Create {what} Dir."))
    }

    /// Create Data Directory
    ///
    /// Located under `define::path::PERSISTENT_DIR` when it exists,
    /// otherwise under `define::path::EPHEMERAL_DIR`.
    pub fn create_data_dir() -> io::Result<String> {
        create_subdir_in_either_dir(
            define::path::PERSISTENT_DIR,
            define::path::EPHEMERAL_DIR,
            define::system::NAME,
        )
        .ok_or_else(|| not_created("Data"))
    }

    /// Create Temporary Directory
    pub fn create_tmp_dir() -> io::Result<String> {
        create_dir_from_path_list(&[
            define::path::EPHEMERAL_DIR,
            &format!("{}-run", define::system::NAME),
        ])
        .ok_or_else(|| not_created("Tmp"))
    }

    /// Create Application Subdirectory and Paths
    ///
    /// Creates the data directory with its `img` and `log` subdirectories,
    /// the temporary directory, and returns the resulting paths.
    pub fn create_app_sub_dir() -> io::Result<SwinetrackPath> {
        let data_dir = create_data_dir()?;
        let tmp_dir = create_tmp_dir()?;
        let img_dir = create_dir_from_path_list(&[&data_dir, define::path::IMG_DIR])
            .ok_or_else(|| not_created("Image"))?;
        let log_dir = create_dir_from_path_list(&[&data_dir, define::path::LOG_DIR])
            .ok_or_else(|| not_created("Log"))?;
        let composite = super::join(&[&tmp_dir, define::path::LAST_COMPOSITE]);
        Ok(SwinetrackPath {
            dir: SwinetrackDir {
                data: data_dir,
                tmp: tmp_dir,
                img: img_dir,
                log: log_dir,
            },
            img: SwinetrackImg { composite },
        })
    }
}

/// Paths of Resources
///
/// This struct represents the paths of the resources used by the application.
#[derive(Debug, Clone)]
pub struct SwinetrackPath {
    /// Directories Paths
    pub dir: SwinetrackDir,
    /// Images Paths
    pub img: SwinetrackImg,
}

/// Paths of Directories
#[derive(Debug, Clone)]
pub struct SwinetrackDir {
    /// Data Directory Path
    pub data: String,
    /// Temporary Directory Path
    pub tmp: String,
    /// Image Directory Path
    pub img: String,
    /// Log Directory Path
    pub log: String,
}

/// Paths of Images
#[derive(Debug, Clone)]
pub struct SwinetrackImg {
    /// Latest rendered composite
    pub composite: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_create_dir_from_path_list() {
        dir::create_dir_from_path_list(&["/tmp", "swinetracktest", "test_create_dir_from_path_list"]);

        // Assert that the directory was created
        assert!(Path::new("/tmp/swinetracktest/test_create_dir_from_path_list").is_dir());
    }

    #[test]
    fn test_create_subdir_in_either_dir() {
        // The first parent doesn't exist, so the second one is used.
        let res = dir::create_subdir_in_either_dir(
            "/tmp/swinetracktest-missing",
            "/tmp/swinetracktest",
            "test_create_subdir_in_either_dir",
        );

        assert_eq!(
            res.as_deref(),
            Some("/tmp/swinetracktest/test_create_subdir_in_either_dir")
        );
        assert!(Path::new("/tmp/swinetracktest/test_create_subdir_in_either_dir").is_dir());
    }

    #[test]
    fn test_create_app_sub_dir() {
        let res = dir::create_app_sub_dir().unwrap();

        assert!(Path::new(&res.dir.img).is_dir());
        assert!(Path::new(&res.dir.log).is_dir());
        assert!(res.dir.data.ends_with("swinetrack"));
        assert_eq!(res.img.composite, "/tmp/swinetrack-run/composite.png");
    }

    #[test]
    fn test_path_join() {
        // Assert that joining two paths works as expected
        assert_eq!(join(&["/test/", "test"]), "/test/test");

        // Assert that joining three paths works as expected
        assert_eq!(join(&["test", "test", "test"]), "test/test/test");

        // Assert that joining two paths with trailing slashes works as expected
        assert_eq!(join(&["/test/", "test/"]), "/test/test/");

        // Assert that joining relative paths works as expected
        assert_eq!(
            join(&["./test/", "test/", "test.txt"]),
            "./test/test/test.txt"
        );
    }
}
