//! Builder configuration stored in `cdcbuilder.toml`.
//!
//! The file tells the builder where the configurator library and its runtime
//! resources live. It sits next to the executable unless
//! `$CDCBUILDER_CONFIG` points elsewhere.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "cdcbuilder.toml";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CDCBUILDER_CONFIG";

pub const DEFAULT_LIBRARY_NAME: &str = "openCONFIGURATOR";

/// Builder configuration (TOML).
///
/// Missing fields default to the directory holding the config file and the
/// stock library name.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuilderConfig {
    /// Directory containing the configurator shared library.
    pub library_path: PathBuf,

    /// Directory with the library's runtime resources (schemas, settings).
    pub resource_path: PathBuf,

    /// Library name without platform prefix or extension.
    pub library_name: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from("."),
            resource_path: PathBuf::from("."),
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("library path {} is not an existing directory", .0.display())]
    LibraryPathMissing(PathBuf),
    #[error("resource path {} is not an existing directory", .0.display())]
    ResourcePathMissing(PathBuf),
    #[error("library_name must not be empty")]
    EmptyLibraryName,
}

impl BuilderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.library_path.is_dir() {
            return Err(ConfigError::LibraryPathMissing(self.library_path.clone()));
        }
        if !self.resource_path.is_dir() {
            return Err(ConfigError::ResourcePathMissing(self.resource_path.clone()));
        }
        if self.library_name.trim().is_empty() {
            return Err(ConfigError::EmptyLibraryName);
        }
        Ok(())
    }

    /// Full path of the shared library for this platform.
    pub fn library_file(&self) -> PathBuf {
        self.library_path
            .join(libloading::library_filename(&self.library_name))
    }

    fn resolve_against(mut self, base: &Path) -> Self {
        if self.library_path.is_relative() {
            self.library_path = base.join(&self.library_path);
        }
        if self.resource_path.is_relative() {
            self.resource_path = base.join(&self.resource_path);
        }
        self
    }
}

/// Location of the config file: `$CDCBUILDER_CONFIG`, else next to the executable.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let exe = env::current_exe().context("locate executable")?;
    let dir = exe
        .parent()
        .with_context(|| format!("executable path missing parent {}", exe.display()))?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BuilderConfig::default()`. Relative paths
/// resolve against the directory containing `path`. The result is validated.
pub fn load_config(path: &Path) -> Result<BuilderConfig> {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let cfg = if path.exists() {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        toml::from_str::<BuilderConfig>(&contents)
            .with_context(|| format!("parse {}", path.display()))?
    } else {
        debug!(path = %path.display(), "config file missing, using defaults");
        BuilderConfig::default()
    };
    let cfg = cfg.resolve_against(base);
    cfg.validate()
        .with_context(|| format!("invalid configuration {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default_rooted_at_config_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join(CONFIG_FILE_NAME)).expect("load");
        assert_eq!(cfg.library_path, temp.path().join("."));
        assert_eq!(cfg.resource_path, temp.path().join("."));
        assert_eq!(cfg.library_name, DEFAULT_LIBRARY_NAME);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(temp.path().join("lib")).expect("mkdir lib");
        fs::create_dir(temp.path().join("resources")).expect("mkdir resources");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "library_path = \"lib\"\nresource_path = \"resources\"\nlibrary_name = \"oc\"\n",
        )
        .expect("write config");

        let cfg = load_config(&path).expect("load");

        assert_eq!(cfg.library_path, temp.path().join("lib"));
        assert_eq!(cfg.resource_path, temp.path().join("resources"));
        assert_eq!(cfg.library_name, "oc");
        assert_eq!(
            cfg.library_file(),
            temp.path().join("lib").join(libloading::library_filename("oc"))
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let temp = tempfile::tempdir().expect("tempdir");
        let elsewhere = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        let body = format!(
            "resource_path = {:?}\n",
            elsewhere.path().to_string_lossy()
        );
        fs::write(&path, body).expect("write config");

        let cfg = load_config(&path).expect("load");

        assert_eq!(cfg.resource_path, elsewhere.path());
        assert_eq!(cfg.library_path, temp.path().join("."));
    }

    #[test]
    fn missing_resource_directory_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "resource_path = \"gone\"\n").expect("write config");

        let err = load_config(&path).unwrap_err();

        let cause = err.downcast_ref::<ConfigError>().expect("config error");
        assert_eq!(
            cause,
            &ConfigError::ResourcePathMissing(temp.path().join("gone"))
        );
    }

    #[test]
    fn blank_library_name_is_rejected() {
        let cfg = BuilderConfig {
            library_name: "  ".to_string(),
            ..BuilderConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyLibraryName));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "library_path = [").expect("write config");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parse"));
    }
}
