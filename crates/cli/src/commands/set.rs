use anyhow::{Context, Result};
use clap::Args;
use instapage_core::WebsiteDataPatch;
use std::path::PathBuf;

use super::site;
use super::template::parse_template;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Path to site directory
    pub path: PathBuf,

    /// JSON object of fields to change, e.g. '{"email": "hi@example.com"}'
    #[arg(long)]
    pub json: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub business_name: Option<String>,

    #[arg(long)]
    pub logo_url: Option<String>,

    #[arg(long)]
    pub hero_image: Option<String>,

    /// Hero headline
    #[arg(long)]
    pub headline: Option<String>,

    /// About text
    #[arg(long)]
    pub about: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub whatsapp: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub template: Option<String>,

    #[arg(long)]
    pub primary_color: Option<String>,

    #[arg(long)]
    pub accent_color: Option<String>,

    /// Base font size in pixels (12-24)
    #[arg(long)]
    pub font_size: Option<u8>,

    /// Show or hide the product section
    #[arg(long)]
    pub show_products: Option<bool>,
}

impl SetArgs {
    /// Build the patch; flags win over the same field in `--json`
    fn into_patch(self) -> Result<(PathBuf, WebsiteDataPatch)> {
        let mut patch = match &self.json {
            Some(json) => serde_json::from_str::<WebsiteDataPatch>(json)
                .context("Invalid --json patch")?,
            None => WebsiteDataPatch::default(),
        };

        macro_rules! flag {
            ($($arg:ident => $field:ident),* $(,)?) => {
                $(
                    if self.$arg.is_some() {
                        patch.$field = self.$arg;
                    }
                )*
            };
        }

        flag!(
            title => title,
            business_name => business_name,
            logo_url => logo_url,
            hero_image => hero_image,
            headline => about_headline,
            about => about_text,
            email => email,
            phone => phone,
            whatsapp => whatsapp,
            address => address,
            primary_color => primary_color,
            accent_color => accent_color,
            font_size => base_font_size,
            show_products => show_products,
        );

        if let Some(id) = &self.template {
            patch.template = Some(parse_template(id)?);
        }

        Ok((self.path, patch))
    }
}

/// Shallow-merge field changes into a site
pub async fn run(args: SetArgs) -> Result<()> {
    let (path, patch) = args.into_patch()?;
    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass --json or at least one field flag");
    }
    patch.check().context("Invalid --json patch")?;

    let mut data = site::load(&path)?;
    patch.merge_into(&mut data);
    site::save(&path, &data)?;

    println!("✓ Updated {}", site::site_file(&path).display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use instapage_core::{TemplateId, WebsiteData};
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SetArgs,
    }

    fn parse(args: &[&str]) -> SetArgs {
        TestCli::parse_from(std::iter::once("set").chain(args.iter().copied())).args
    }

    fn site_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        site::save(dir.path(), &WebsiteData::starter()).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_set_fields_from_flags() {
        let dir = site_dir();
        let path = dir.path().to_str().unwrap();

        run(parse(&[path, "--email", "team@sunrise.test", "--template", "Startup", "--font-size", "30"]))
            .await
            .unwrap();

        let data = site::load(dir.path()).unwrap();
        assert_eq!(data.email, "team@sunrise.test");
        assert_eq!(data.template, TemplateId::Startup);
        assert_eq!(data.base_font_size, 24);
        assert_eq!(data.business_name, "Business Name");
    }

    #[tokio::test]
    async fn test_set_from_json_with_flag_override() {
        let dir = site_dir();
        let path = dir.path().to_str().unwrap();

        run(parse(&[
            path,
            "--json",
            r#"{"about_headline": "From JSON", "phone": "555", "show_products": false}"#,
            "--phone",
            "777",
        ]))
        .await
        .unwrap();

        let data = site::load(dir.path()).unwrap();
        assert_eq!(data.about_headline, "From JSON");
        assert_eq!(data.phone, "777");
        assert!(!data.show_products);
    }

    #[tokio::test]
    async fn test_rejects_unknown_json_field() {
        let dir = site_dir();
        let path = dir.path().to_str().unwrap();
        let err = run(parse(&[path, "--json", r#"{"colour": "red"}"#])).await.unwrap_err();
        assert!(err.to_string().contains("Invalid --json patch"));
    }

    #[tokio::test]
    async fn test_duplicate_product_ids_are_not_saved() {
        let dir = site_dir();
        let path = dir.path().to_str().unwrap();
        let json = r#"{"products": [
            {"id": "1", "name": "A", "price": "$1", "description": "", "image_url": ""},
            {"id": "1", "name": "B", "price": "$2", "description": "", "image_url": ""}
        ]}"#;

        let err = run(parse(&[path, "--json", json])).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate product id '1'"));
        assert_eq!(site::load(dir.path()).unwrap(), WebsiteData::starter());
    }

    #[tokio::test]
    async fn test_empty_patch_is_an_error() {
        let dir = site_dir();
        let path = dir.path().to_str().unwrap();
        assert!(run(parse(&[path])).await.is_err());
    }
}
