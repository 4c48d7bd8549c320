use anyhow::{Context, Result};
use instapage_generator::package;
use std::path::PathBuf;

use super::site;

/// Package the site into `<slug>-site.zip`
pub async fn run(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("📦 Packaging site...");

    let data = site::load(&path)?;
    let archive = package(&data).context("Failed to build archive")?;

    let dir = output.unwrap_or_else(|| path.clone());
    let written = archive
        .write_to(&dir)
        .with_context(|| format!("Failed to write archive to {}", dir.display()))?;

    println!("   ✓ {} ({} bytes)", archive.file_name, archive.bytes.len());
    println!();
    println!("✅ Export complete!");
    println!("   Archive: {}", written.display());
    println!("   Upload index.html from the archive to your web host's public_html folder.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use instapage_core::WebsiteData;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_writes_named_archive() {
        let dir = TempDir::new().unwrap();
        let mut data = WebsiteData::starter();
        data.business_name = "Wick & Co".to_string();
        site::save(dir.path(), &data).unwrap();

        run(dir.path().to_path_buf(), None).await.unwrap();

        let archive = dir.path().join(format!("{}-site.zip", data.archive_slug()));
        assert!(archive.exists());
        assert_eq!(std::fs::read(&archive).unwrap(), package(&data).unwrap().bytes);
    }

    #[tokio::test]
    async fn test_export_to_output_dir() {
        let dir = TempDir::new().unwrap();
        site::save(dir.path(), &WebsiteData::starter()).unwrap();
        let out = dir.path().join("exports");

        run(dir.path().to_path_buf(), Some(out.clone())).await.unwrap();

        assert!(out.join("business-name-site.zip").exists());
    }
}
