//! Per-user directories for configuration and logs.

use std::path::{Path, PathBuf};

use galaxy_config::{APP_DIR_NAME, Config, ConfigError};

/// Where Galaxy keeps its files.
///
/// Config follows the OS config location (XDG on Linux, Known Folders on
/// Windows, Library on macOS). Logs go to the local data directory, falling
/// back to a `logs` folder beside the config.
#[derive(Clone, Debug, PartialEq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON log written by debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve directories without creating them.
    ///
    /// An explicit `config_override` (from `--config`) keeps everything under
    /// that directory.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoConfigDir`] if no override is given and the OS exposes
    /// no configuration directory.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(dir) = config_override {
            return Ok(Self::resolve_with_root(dir));
        }
        let config_dir = Config::default_dir()?;
        let log_dir = dirs::data_local_dir()
            .map(|base| base.join(APP_DIR_NAME).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));
        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    /// Everything rooted under `root`. Used for `--config` and in tests.
    pub fn resolve_with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    /// Create both directories on disk.
    pub fn create_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_roots_everything() {
        let root = Path::new("/tmp/galaxy-test");
        let dirs = PlatformDirs::resolve(Some(root)).unwrap();
        assert_eq!(dirs.config_dir, root);
        assert_eq!(dirs.log_dir, root.join("logs"));
    }

    #[test]
    fn test_default_resolution_is_absolute() {
        // Only meaningful where the OS has a config dir (every desktop target).
        if let Ok(dirs) = PlatformDirs::resolve(None) {
            assert!(dirs.config_dir.is_absolute());
            assert!(dirs.log_dir.is_absolute());
            assert!(dirs.config_dir.ends_with(APP_DIR_NAME));
        }
    }

    #[test]
    fn test_create_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(&tmp.path().join("galaxy"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }
}
