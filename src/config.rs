//! Runtime paths for cashflow.
//!
//! Resolution order for the data directory:
//!
//! 1. `CASHFLOW_DATA_DIR` environment variable (if set)
//! 2. The platform data directory (`directories::ProjectDirs`)
//!
//! CSV uploads are read from `CASHFLOW_UPLOAD_DIR` if set, otherwise from
//! `<data_dir>/uploads`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DATA_DIR_ENV: &str = "CASHFLOW_DATA_DIR";
pub(crate) const UPLOAD_DIR_ENV: &str = "CASHFLOW_UPLOAD_DIR";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    data_dir: PathBuf,
    upload_dir: PathBuf,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => directories::ProjectDirs::from("com", "cashflow", "Cashflow")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        let upload_dir = std::env::var_os(UPLOAD_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("uploads"));
        Ok(Self {
            data_dir,
            upload_dir,
        })
    }

    /// Config rooted at `base_dir`, ignoring the environment.
    #[cfg(test)]
    pub(crate) fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            upload_dir: base_dir.join("uploads"),
            data_dir: base_dir,
        }
    }

    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub(crate) fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join("cashflow.db")
    }

    /// Resolve an uploaded file name to the path the importer reads.
    /// An absolute `file_name` is used as-is.
    pub(crate) fn upload_path(&self, file_name: &str) -> PathBuf {
        self.upload_dir.join(file_name)
    }

    pub(crate) fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })?;
        std::fs::create_dir_all(&self.upload_dir).with_context(|| {
            format!("Failed to create upload directory: {}", self.upload_dir.display())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_with_base_dir_layout() {
        let config = Config::with_base_dir(PathBuf::from("/tmp/cashflow-test"));
        assert_eq!(config.data_dir(), Path::new("/tmp/cashflow-test"));
        assert_eq!(config.upload_dir(), Path::new("/tmp/cashflow-test/uploads"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/cashflow-test/cashflow.db"));
    }

    #[test]
    fn test_upload_path_joins_file_name() {
        let config = Config::with_base_dir(PathBuf::from("/data"));
        assert_eq!(
            config.upload_path("march.csv"),
            PathBuf::from("/data/uploads/march.csv")
        );
    }

    #[test]
    fn test_upload_path_absolute_name_wins() {
        let config = Config::with_base_dir(PathBuf::from("/data"));
        assert_eq!(
            config.upload_path("/elsewhere/march.csv"),
            PathBuf::from("/elsewhere/march.csv")
        );
    }

    #[test]
    fn test_ensure_directories_creates_both() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_base_dir(dir.path().join("nested"));
        config.ensure_directories().unwrap();
        assert!(config.data_dir().is_dir());
        assert!(config.upload_dir().is_dir());
    }
}
