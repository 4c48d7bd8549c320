use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use instapage_core::WebsiteDataPatch;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::site;

/// Images above this size make the page slow to load
const LARGE_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Store local images inside the site as `data:` URLs
///
/// The exported page is a single file, so images that should travel with it
/// have to be embedded rather than referenced.
pub async fn run(path: PathBuf, logo: Option<PathBuf>, hero: Option<PathBuf>) -> Result<()> {
    if logo.is_none() && hero.is_none() {
        anyhow::bail!("Nothing to embed. Pass --logo and/or --hero");
    }

    let mut data = site::load(&path)?;
    let mut patch = WebsiteDataPatch::default();

    if let Some(image) = logo {
        println!("🖼  Embedding logo: {}", image.display());
        patch.logo_url = Some(data_url(&image)?);
    }
    if let Some(image) = hero {
        println!("🖼  Embedding hero image: {}", image.display());
        patch.hero_image = Some(data_url(&image)?);
    }

    patch.merge_into(&mut data);
    site::save(&path, &data)?;

    println!("✓ Updated {}", site::site_file(&path).display());
    Ok(())
}

/// Read and check an image file, returning it as a base64 data URL
pub fn data_url(image: &Path) -> Result<String> {
    let mime = mime_guess::from_path(image)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .with_context(|| format!("Not an image file: {}", image.display()))?;

    let bytes = fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;

    if mime.subtype() == mime_guess::mime::SVG {
        if !String::from_utf8_lossy(&bytes).contains("<svg") {
            anyhow::bail!("{} is not a valid SVG file", image.display());
        }
    } else {
        let (width, height) = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .context("Failed to read image")?
            .into_dimensions()
            .with_context(|| format!("{} is not a readable image", image.display()))?;
        println!("   ✓ {}x{} {}", width, height, mime.essence_str());
    }

    if bytes.len() > LARGE_IMAGE_BYTES {
        println!(
            "   ⚠ Warning: {} is {} KB; large images slow down the page",
            image.display(),
            bytes.len() / 1024
        );
    }

    Ok(format!("data:{};base64,{}", mime.essence_str(), STANDARD.encode(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use instapage_core::WebsiteData;
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        image::RgbImage::new(2, 3).save(path).unwrap();
    }

    #[test]
    fn test_data_url_for_png() {
        let dir = TempDir::new().unwrap();
        let png = dir.path().join("logo.png");
        write_png(&png);

        let url = data_url(&png).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let encoded = url.trim_start_matches("data:image/png;base64,");
        assert_eq!(STANDARD.decode(encoded).unwrap(), fs::read(&png).unwrap());
    }

    #[test]
    fn test_rejects_non_images() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("notes.txt");
        fs::write(&text, "hello").unwrap();
        assert!(data_url(&text).unwrap_err().to_string().contains("Not an image file"));

        let fake = dir.path().join("fake.png");
        fs::write(&fake, "not really a png").unwrap();
        assert!(data_url(&fake).is_err());
    }

    #[test]
    fn test_svg_is_embedded_without_decoding() {
        let dir = TempDir::new().unwrap();
        let svg = dir.path().join("mark.svg");
        fs::write(&svg, r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#).unwrap();
        assert!(data_url(&svg).unwrap().starts_with("data:image/svg+xml;base64,"));
    }

    #[tokio::test]
    async fn test_embed_updates_site() {
        let dir = TempDir::new().unwrap();
        site::save(dir.path(), &WebsiteData::starter()).unwrap();
        let png = dir.path().join("hero.png");
        write_png(&png);

        run(dir.path().to_path_buf(), None, Some(png)).await.unwrap();

        let data = site::load(dir.path()).unwrap();
        assert!(data.hero_image.starts_with("data:image/png;base64,"));
        assert_eq!(data.logo_url, WebsiteData::starter().logo_url);
    }
}
