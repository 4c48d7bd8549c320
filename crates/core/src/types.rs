use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest base font size the editor allows, in pixels
pub const MIN_FONT_SIZE: u8 = 12;

/// Largest base font size the editor allows, in pixels
pub const MAX_FONT_SIZE: u8 = 24;

/// Longest hero teaser of the about text, in characters, ellipsis included
pub const TEASER_CHARS: usize = 180;

/// Complete description of one generated site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteData {
    pub title: String,
    pub business_name: String,
    pub logo_url: String,
    pub hero_image: String,
    pub about_headline: String,
    pub about_text: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub products: Vec<Product>,
    pub template: TemplateId,
    pub primary_color: String,
    pub accent_color: String,
    pub base_font_size: u8,
    pub show_products: bool,
}

impl WebsiteData {
    /// Data a freshly initialized project starts from
    pub fn starter() -> Self {
        Self {
            title: "My Awesome Page".to_string(),
            business_name: "Business Name".to_string(),
            logo_url: "https://picsum.photos/200/200".to_string(),
            hero_image: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?auto=format&fit=crop&q=80&w=1200&h=800".to_string(),
            about_headline: "Empowering You to Reach Your Full Potential".to_string(),
            about_text: "I help professionals and dreamers navigate their journey toward success. With over 10 years of coaching experience, my mission is to provide you with the tools and mindset needed to transform your life.".to_string(),
            email: "hello@example.com".to_string(),
            phone: "+1 (555) 000-0000".to_string(),
            whatsapp: "15550000000".to_string(),
            address: "123 Coach Lane, Wellness District".to_string(),
            products: vec![
                Product {
                    id: "1".to_string(),
                    name: "1-on-1 Strategy Session".to_string(),
                    price: "$150".to_string(),
                    description: "A deep dive into your goals with a personalized roadmap.".to_string(),
                    image_url: "https://images.unsplash.com/photo-1515162305285-0293e4767cc2?auto=format&fit=crop&q=80&w=400&h=400".to_string(),
                },
                Product {
                    id: "2".to_string(),
                    name: "Mastermind Group".to_string(),
                    price: "$499".to_string(),
                    description: "Join a community of like-minded high-achievers.".to_string(),
                    image_url: "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?auto=format&fit=crop&q=80&w=400&h=400".to_string(),
                },
            ],
            template: TemplateId::Coach,
            primary_color: "#8b5e3c".to_string(),
            accent_color: "#fdf8f4".to_string(),
            base_font_size: 16,
            show_products: true,
        }
    }

    /// Base font size clamped to the supported range
    pub fn font_size(&self) -> u8 {
        self.base_font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }

    /// Whether the product section should appear at all
    pub fn products_visible(&self) -> bool {
        self.show_products && !self.products.is_empty()
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// URL-safe slug derived from the business name, used for archive names
    ///
    /// Lower-cases the name and collapses every whitespace run into a single
    /// hyphen. Path separators are replaced too so the result is always a
    /// plain file name.
    pub fn archive_slug(&self) -> String {
        let slug = self
            .business_name
            .trim()
            .to_lowercase()
            .split(char::is_whitespace)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
            .replace(['/', '\\'], "-");

        if slug.is_empty() {
            "website".to_string()
        } else {
            slug
        }
    }
}

/// One entry of the product/service list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Free-form display price ("$150", "From 20€", ...)
    pub price: String,
    pub description: String,
    pub image_url: String,
}

impl Product {
    /// New product with placeholder copy and a freshly generated id
    pub fn placeholder() -> Self {
        let id = new_product_id();
        Self {
            image_url: format!("https://picsum.photos/seed/{}/400/400", id),
            id,
            name: "New Product".to_string(),
            price: "$0.00".to_string(),
            description: "Product description goes here...".to_string(),
        }
    }
}

/// Generate an id for a product
pub fn new_product_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Visual template selected for the site
///
/// Anything that is not one of the known identifiers is kept as
/// `Unrecognized` so a site file written by a newer version still loads.
/// The renderer falls back to its default style bundle for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateId {
    Modern,
    Elegant,
    Startup,
    Coach,
    Creative,
    Restaurant,
    Fitness,
    Minimalist,
    Unrecognized(String),
}

impl TemplateId {
    pub const ALL: [TemplateId; 8] = [
        TemplateId::Modern,
        TemplateId::Elegant,
        TemplateId::Startup,
        TemplateId::Coach,
        TemplateId::Creative,
        TemplateId::Restaurant,
        TemplateId::Fitness,
        TemplateId::Minimalist,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Elegant => "elegant",
            TemplateId::Startup => "startup",
            TemplateId::Coach => "coach",
            TemplateId::Creative => "creative",
            TemplateId::Restaurant => "restaurant",
            TemplateId::Fitness => "fitness",
            TemplateId::Minimalist => "minimalist",
            TemplateId::Unrecognized(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TemplateId::Unrecognized(_))
    }

    /// Catalog entry for this template, if it is a known one
    pub fn config(&self) -> Option<&'static TemplateConfig> {
        TEMPLATES.iter().find(|t| t.id == *self)
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "modern" => TemplateId::Modern,
            "elegant" => TemplateId::Elegant,
            "startup" => TemplateId::Startup,
            "coach" => TemplateId::Coach,
            "creative" => TemplateId::Creative,
            "restaurant" => TemplateId::Restaurant,
            "fitness" => TemplateId::Fitness,
            "minimalist" => TemplateId::Minimalist,
            _ => TemplateId::Unrecognized(value),
        }
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        TemplateId::from(value.to_string())
    }
}

impl From<TemplateId> for String {
    fn from(value: TemplateId) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog metadata shown when choosing a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub preview_url: &'static str,
}

pub static TEMPLATES: [TemplateConfig; 8] = [
    TemplateConfig {
        id: TemplateId::Modern,
        name: "Modern Dark",
        description: "Sleek, high-contrast layout for tech and digital products.",
        preview_url: "https://images.unsplash.com/photo-1550745165-9bc0b252726f?auto=format&fit=crop&q=80&w=400&h=300",
    },
    TemplateConfig {
        id: TemplateId::Elegant,
        name: "Elegant Minimal",
        description: "Clean typography and soft colors for personal brands and boutiques.",
        preview_url: "https://images.unsplash.com/photo-1494438639946-1ebd1d20bf85?auto=format&fit=crop&q=80&w=400&h=300",
    },
    TemplateConfig {
        id: TemplateId::Startup,
        name: "Startup Vibrant",
        description: "Dynamic sections and bold colors to capture user attention.",
        preview_url: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&q=80&w=400&h=300",
    },
    TemplateConfig {
        id: TemplateId::Coach,
        name: "Coach Portfolio",
        description: "Soft, professional, and personal. Perfect for mentors and coaches.",
        preview_url: "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?auto=format&fit=crop&q=80&w=400&h=300",
    },
    TemplateConfig {
        id: TemplateId::Creative,
        name: "Creative Studio",
        description: "Bold, artistic design with large typography and vibrant accents.",
        preview_url: "https://images.unsplash.com/photo-1558655146-d09347e92766?auto=format&fit=crop&q=80&w=400&h=300",
    },
    TemplateConfig {
        id: TemplateId::Restaurant,
        name: "Culinary Delight",
        description: "Warm, appetizing layout focused on imagery and comfort.",
        preview_url: "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?auto=format&fit=crop&q=80&w=400&h=300",
    },
    TemplateConfig {
        id: TemplateId::Fitness,
        name: "Power & Grit",
        description: "High-energy, intense design for gyms and fitness trainers.",
        preview_url: "https://images.unsplash.com/photo-1534438327276-14e5300c3a48?auto=format&fit=crop&q=80&w=400&h=300",
    },
    TemplateConfig {
        id: TemplateId::Minimalist,
        name: "Pure Essential",
        description: "Ultra-clean, focusing purely on content and white space.",
        preview_url: "https://images.unsplash.com/photo-1481277542470-605612bd2d61?auto=format&fit=crop&q=80&w=400&h=300",
    },
];

/// Check for a `#rgb` or `#rrggbb` color
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_from_known_strings() {
        assert_eq!(TemplateId::from("coach"), TemplateId::Coach);
        assert_eq!(TemplateId::from("Creative"), TemplateId::Creative);
        assert_eq!(TemplateId::from(" minimalist "), TemplateId::Minimalist);
        for id in TemplateId::ALL {
            assert_eq!(TemplateId::from(id.as_str()), id);
        }
    }

    #[test]
    fn test_template_id_unknown_is_preserved() {
        let id = TemplateId::from("brutalist");
        assert_eq!(id, TemplateId::Unrecognized("brutalist".to_string()));
        assert!(!id.is_known());
        assert_eq!(id.to_string(), "brutalist");
        assert!(id.config().is_none());
    }

    #[test]
    fn test_template_id_serde_round_trip() {
        let json = serde_json::to_string(&TemplateId::Fitness).unwrap();
        assert_eq!(json, "\"fitness\"");

        let parsed: TemplateId = serde_json::from_str("\"vaporwave\"").unwrap();
        assert_eq!(parsed, TemplateId::Unrecognized("vaporwave".to_string()));
    }

    #[test]
    fn test_catalog_covers_every_template() {
        for id in TemplateId::ALL {
            let config = id.config().expect("catalog entry");
            assert_eq!(config.id, id);
            assert!(!config.name.is_empty());
        }
    }

    #[test]
    fn test_placeholder_products_get_unique_ids() {
        let a = Product::placeholder();
        let b = Product::placeholder();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "New Product");
        assert_eq!(a.price, "$0.00");
        assert!(a.image_url.contains(&a.id));
    }

    #[test]
    fn test_archive_slug() {
        let mut data = WebsiteData::starter();
        data.business_name = "Acme  Coffee\tRoasters".to_string();
        assert_eq!(data.archive_slug(), "acme-coffee-roasters");

        data.business_name = "AC/DC Tribute".to_string();
        assert_eq!(data.archive_slug(), "ac-dc-tribute");

        data.business_name = "   ".to_string();
        assert_eq!(data.archive_slug(), "website");
    }

    #[test]
    fn test_font_size_is_clamped() {
        let mut data = WebsiteData::starter();
        data.base_font_size = 4;
        assert_eq!(data.font_size(), MIN_FONT_SIZE);
        data.base_font_size = 40;
        assert_eq!(data.font_size(), MAX_FONT_SIZE);
        data.base_font_size = 18;
        assert_eq!(data.font_size(), 18);
    }

    #[test]
    fn test_products_visible() {
        let mut data = WebsiteData::starter();
        assert!(data.products_visible());
        data.show_products = false;
        assert!(!data.products_visible());
        data.show_products = true;
        data.products.clear();
        assert!(!data.products_visible());
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#8b5e3c"));
        assert!(is_hex_color("#FFF"));
        assert!(!is_hex_color("8b5e3c"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("red; background: url(x)"));
    }
}
