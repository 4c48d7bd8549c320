use anyhow::{Context, Result};
use instapage_generator::{INDEX_FILE, README, README_FILE, render};
use std::fs;
use std::path::PathBuf;

use super::site;

/// Write the rendered page and hosting instructions to `output`
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let data = site::load(&path)?;
    println!("✓ Loaded: {}", data.business_name);
    println!("  Template: {}", data.template);
    if data.products_visible() {
        println!("  Products: {}", data.products.len());
    } else {
        println!("  Products: hidden");
    }
    println!();

    fs::create_dir_all(&output).context("Failed to create output directory")?;

    println!("📄 Generating {}...", INDEX_FILE);
    let html = render(&data);
    fs::write(output.join(INDEX_FILE), &html).context("Failed to write index.html")?;
    println!("   ✓ Generated {} ({} bytes)", INDEX_FILE, html.len());

    fs::write(output.join(README_FILE), README).context("Failed to write README.txt")?;
    println!("   ✓ Generated {}", README_FILE);

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use instapage_core::WebsiteData;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_writes_page_and_readme() {
        let dir = TempDir::new().unwrap();
        let data = WebsiteData::starter();
        site::save(dir.path(), &data).unwrap();
        let out = dir.path().join("dist");

        run(dir.path().to_path_buf(), out.clone()).await.unwrap();

        assert_eq!(fs::read_to_string(out.join(INDEX_FILE)).unwrap(), render(&data));
        assert_eq!(fs::read_to_string(out.join(README_FILE)).unwrap(), README);
    }
}
