use crate::error::{Error, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Name of the site file inside a project directory
pub const SITE_FILE: &str = "site.toml";

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Serialize, Deserialize)]
struct RawConfig {
    site: RawSite,
    business: RawBusiness,
    #[serde(default)]
    contact: RawContact,
    #[serde(default, rename = "product")]
    products: Vec<RawProduct>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawSite {
    #[serde(default)]
    title: String,
    template: TemplateId,
    #[serde(default)]
    primary_color: String,
    #[serde(default)]
    accent_color: String,
    #[serde(default = "default_font_size")]
    base_font_size: i64,
    #[serde(default = "default_show_products")]
    show_products: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawBusiness {
    name: String,
    #[serde(default)]
    logo: String,
    #[serde(default)]
    hero_image: String,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    about: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawContact {
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    whatsapp: String,
    #[serde(default)]
    address: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
}

fn default_font_size() -> i64 {
    16
}

fn default_show_products() -> bool {
    true
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<WebsiteData> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<WebsiteData> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_font_size = parse_font_size(raw.site.base_font_size)?;

    if !raw.site.template.is_known() {
        tracing::warn!(
            template = %raw.site.template,
            "unknown template, the default style will be used"
        );
    }

    // Assign ids to products that were added by hand without one
    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(raw.products.len());
    for p in raw.products {
        let id = match p.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => new_product_id(),
        };
        if !seen.insert(id.clone()) {
            return Err(Error::ConfigParse(format!(
                "Duplicate product id '{}'",
                id
            )));
        }
        products.push(Product {
            id,
            name: p.name,
            price: p.price,
            description: p.description,
            image_url: p.image,
        });
    }

    Ok(WebsiteData {
        title: raw.site.title,
        business_name: raw.business.name,
        logo_url: raw.business.logo,
        hero_image: raw.business.hero_image,
        about_headline: raw.business.headline,
        about_text: raw.business.about,
        email: raw.contact.email,
        phone: raw.contact.phone,
        whatsapp: raw.contact.whatsapp,
        address: raw.contact.address,
        products,
        template: raw.site.template,
        primary_color: raw.site.primary_color,
        accent_color: raw.site.accent_color,
        base_font_size,
        show_products: raw.site.show_products,
    })
}

/// Serialize site data into the site.toml layout
pub fn to_site_toml(data: &WebsiteData) -> Result<String> {
    let raw = RawConfig {
        site: RawSite {
            title: data.title.clone(),
            template: data.template.clone(),
            primary_color: data.primary_color.clone(),
            accent_color: data.accent_color.clone(),
            base_font_size: i64::from(data.base_font_size),
            show_products: data.show_products,
        },
        business: RawBusiness {
            name: data.business_name.clone(),
            logo: data.logo_url.clone(),
            hero_image: data.hero_image.clone(),
            headline: data.about_headline.clone(),
            about: data.about_text.clone(),
        },
        contact: RawContact {
            email: data.email.clone(),
            phone: data.phone.clone(),
            whatsapp: data.whatsapp.clone(),
            address: data.address.clone(),
        },
        products: data
            .products
            .iter()
            .map(|p| RawProduct {
                id: Some(p.id.clone()),
                name: p.name.clone(),
                price: p.price.clone(),
                description: p.description.clone(),
                image: p.image_url.clone(),
            })
            .collect(),
    };

    Ok(toml::to_string_pretty(&raw)?)
}

/// Write site data to a site.toml file
pub fn write_site_toml<P: AsRef<Path>>(path: P, data: &WebsiteData) -> Result<()> {
    let content = to_site_toml(data)?;
    fs::write(path, content)?;
    Ok(())
}

fn parse_font_size(value: i64) -> Result<u8> {
    let min = i64::from(MIN_FONT_SIZE);
    let max = i64::from(MAX_FONT_SIZE);
    if !(min..=max).contains(&value) {
        return Err(Error::ConfigParse(format!(
            "base_font_size must be between {} and {}, got {}",
            MIN_FONT_SIZE, MAX_FONT_SIZE, value
        )));
    }
    u8::try_from(value).map_err(|e| Error::ConfigParse(e.to_string()))
}
