use anyhow::{Context, Result};
use chrono::Local;
use instapage_core::{SITE_FILE, WebsiteData, to_site_toml};
use instapage_validator::ASSETS_DIR;
use std::fs;
use std::path::{Path, PathBuf};

use super::template::parse_template;

/// Create a site directory with starter content.
///
/// Writes `site.toml` filled with the starter coaching site and creates an
/// empty `assets/` directory for local images. The directory is created if
/// it does not exist; an existing `site.toml` is never overwritten.
pub async fn run(path: PathBuf, name: Option<String>, template: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_toml = path.join(SITE_FILE);
    if site_toml.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            SITE_FILE,
            site_toml.display()
        );
    }

    let data = starter_site(name, template.as_deref())?;

    fs::create_dir_all(path.join(ASSETS_DIR))
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_starter(&path, &data)?;

    println!("✓ Created {}", SITE_FILE);
    println!("✓ Created {}/", ASSETS_DIR);
    println!();
    println!("  Business: {}", data.business_name);
    println!("  Template: {}", data.template);
    println!("  Products: {}", data.products.len());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} or run 'instapage preview {}'", SITE_FILE, path.display());
    println!("  2. Check it with 'instapage validate {}'", path.display());
    println!("  3. Package it with 'instapage export {}'", path.display());

    Ok(())
}

fn starter_site(name: Option<String>, template: Option<&str>) -> Result<WebsiteData> {
    let mut data = WebsiteData::starter();
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        data.title = name.clone();
        data.business_name = name;
    }
    if let Some(id) = template {
        data.template = parse_template(id)?;
    }
    Ok(data)
}

fn write_starter(path: &Path, data: &WebsiteData) -> Result<()> {
    let body = to_site_toml(data).context("Failed to serialize site")?;
    let content = format!(
        "# Site created by instapage on {}\n\
         # Edit the values below, then run `instapage preview` to see the result.\n\n{}",
        Local::now().format("%Y-%m-%d"),
        body
    );
    fs::write(path.join(SITE_FILE), content).context("Failed to write site.toml")?;
    Ok(())
}
