use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use instapage_core::WebsiteData;
use thiserror::Error;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::render::render;

/// Name of the page inside the archive
pub const INDEX_FILE: &str = "index.html";

/// Name of the instructions file inside the archive
pub const README_FILE: &str = "README.txt";

/// Hosting instructions shipped next to the page
pub const README: &str = "instapage: Fast & Professional.

Instructions:
1. Open CPanel File Manager.
2. Go to public_html.
3. Upload 'index.html'.
4. Your site is live!
";

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Failed to build archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloadable bundle of a rendered site
#[derive(Debug, Clone)]
pub struct SiteArchive {
    /// Suggested file name, `<business-name-slug>-site.zip`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SiteArchive {
    /// Save the archive into `dir` under its suggested name
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, PackageError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// File name used for a site's archive
pub fn archive_file_name(data: &WebsiteData) -> String {
    format!("{}-site.zip", data.archive_slug())
}

/// Render `data` and pack the page plus instructions into an in-memory zip
///
/// Entries carry a fixed timestamp so identical data always produces an
/// identical archive.
pub fn package(data: &WebsiteData) -> Result<SiteArchive, PackageError> {
    let html = render(data);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    zip.start_file(INDEX_FILE, options)?;
    zip.write_all(html.as_bytes())?;

    zip.start_file(README_FILE, options)?;
    zip.write_all(README.as_bytes())?;

    let bytes = zip.finish()?.into_inner();

    let file_name = archive_file_name(data);
    tracing::debug!(file = %file_name, bytes = bytes.len(), "packaged site");

    Ok(SiteArchive { file_name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn read_entries(bytes: &[u8]) -> Vec<(String, String)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = String::new();
                file.read_to_string(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_archive_contains_page_and_readme() {
        let data = WebsiteData::starter();
        let archive = package(&data).unwrap();
        let entries = read_entries(&archive.bytes);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, INDEX_FILE);
        assert_eq!(entries[0].1, render(&data));
        assert_eq!(entries[1].0, README_FILE);
        assert_eq!(entries[1].1, README);
    }

    #[test]
    fn test_archive_file_name_from_business_name() {
        let mut data = WebsiteData::starter();
        data.business_name = "Sunrise Yoga Studio".to_string();
        let archive = package(&data).unwrap();
        assert_eq!(archive.file_name, "sunrise-yoga-studio-site.zip");
    }

    #[test]
    fn test_archive_is_reproducible() {
        let data = WebsiteData::starter();
        assert_eq!(package(&data).unwrap().bytes, package(&data).unwrap().bytes);
    }

    #[test]
    fn test_write_to_directory() {
        let dir = TempDir::new().unwrap();
        let archive = package(&WebsiteData::starter()).unwrap();
        let path = archive.write_to(&dir.path().join("out")).unwrap();
        assert_eq!(path.file_name().unwrap(), "business-name-site.zip");
        assert_eq!(std::fs::read(&path).unwrap(), archive.bytes);
    }
}
