use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{auth::mock::DEFAULT_AUTH_LATENCY, upload::UploadConfig};

pub fn get_root_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("videotag")
}

/// Get the path of the key/value file inside a data directory
pub fn get_storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join("storage.json")
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub auth_latency: Duration,
    pub upload: UploadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: get_root_data_dir(),
            auth_latency: DEFAULT_AUTH_LATENCY,
            upload: UploadConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn storage_path(&self) -> PathBuf {
        get_storage_path(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.data_dir.ends_with("videotag"));
        assert_eq!(config.storage_path(), config.data_dir.join("storage.json"));
        assert_eq!(config.auth_latency, Duration::from_millis(1000));
        assert_eq!(config.upload.tick_interval, Duration::from_millis(200));
        assert_eq!(config.upload.max_bytes, 100 * 1024 * 1024);
    }
}
