use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the platform data directory (useful for tests and portable setups).
pub const DATA_DIR_ENV: &str = "DINNER_DATA_DIR";

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("", "", "dinner")
                .context("Could not determine home directory")?
                .data_dir()
                .to_path_buf(),
        };
        Self::in_dir(data_dir)
    }

    pub fn in_dir(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("dinner.db");

        Ok(Config { db_path, data_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let config = Config::in_dir(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(config.data_dir, nested);
        assert_eq!(config.db_path, nested.join("dinner.db"));
    }
}
