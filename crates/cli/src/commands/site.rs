//! Loading and saving the site file of a project directory.

use anyhow::{Context, Result};
use instapage_core::{SITE_FILE, WebsiteData, parse_site_toml, write_site_toml};
use std::path::{Path, PathBuf};

pub fn site_file(path: &Path) -> PathBuf {
    path.join(SITE_FILE)
}

/// Load `site.toml` from a site directory
pub fn load(path: &Path) -> Result<WebsiteData> {
    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'instapage init {}' first",
            path.display(),
            path.display()
        );
    }

    let site_toml = site_file(path);
    if !site_toml.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'instapage init {}' first",
            SITE_FILE,
            path.display(),
            path.display()
        );
    }

    parse_site_toml(&site_toml).with_context(|| format!("Failed to parse {}", site_toml.display()))
}

/// Write `data` back to the site directory
pub fn save(path: &Path, data: &WebsiteData) -> Result<()> {
    let site_toml = site_file(path);
    write_site_toml(&site_toml, data)
        .with_context(|| format!("Failed to write {}", site_toml.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_missing_site_file() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("site.toml not found"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let data = WebsiteData::starter();
        save(dir.path(), &data).unwrap();
        assert_eq!(load(dir.path()).unwrap(), data);
    }
}
