use anyhow::Result;
use instapage_core::{TEMPLATES, TemplateId};
use std::path::PathBuf;

use super::site;

/// Resolve a template id given on the command line
pub fn parse_template(id: &str) -> Result<TemplateId> {
    let template = TemplateId::from(id);
    if !template.is_known() {
        let known: Vec<&str> = TEMPLATES.iter().map(|t| t.id.as_str()).collect();
        anyhow::bail!(
            "Unknown template '{}'\nAvailable templates: {}",
            id.trim(),
            known.join(", ")
        );
    }
    Ok(template)
}

/// Print the template catalog
pub async fn list() -> Result<()> {
    println!("🎨 Templates:\n");
    for template in TEMPLATES.iter() {
        println!("  {:<12} {}", template.id.as_str(), template.name);
        println!("  {:<12} {}", "", template.description);
        println!();
    }
    println!("Switch with: instapage template use <site-dir> <id>");
    Ok(())
}

/// Switch a site's template
pub async fn use_template(path: PathBuf, id: String) -> Result<()> {
    let template = parse_template(&id)?;
    let mut data = site::load(&path)?;

    if data.template == template {
        println!("✓ {} already uses the {} template", path.display(), template);
        return Ok(());
    }

    let previous = std::mem::replace(&mut data.template, template);
    site::save(&path, &data)?;

    println!("✓ Template changed: {} → {}", previous, data.template);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use instapage_core::WebsiteData;
    use tempfile::TempDir;

    #[test]
    fn test_parse_template() {
        assert_eq!(parse_template("Minimalist").unwrap(), TemplateId::Minimalist);
        assert_eq!(parse_template(" coach ").unwrap(), TemplateId::Coach);
        let err = parse_template("neon").unwrap_err().to_string();
        assert!(err.contains("Unknown template 'neon'"));
        assert!(err.contains("modern, elegant"));
    }

    #[tokio::test]
    async fn test_use_template_updates_site() {
        let dir = TempDir::new().unwrap();
        site::save(dir.path(), &WebsiteData::starter()).unwrap();

        use_template(dir.path().to_path_buf(), "creative".to_string())
            .await
            .unwrap();

        assert_eq!(site::load(dir.path()).unwrap().template, TemplateId::Creative);
    }
}
