//! Pre-export checks for a site.
//!
//! Nothing here blocks rendering: the renderer copes with any data. The
//! report tells the user what will look broken or odd in the exported page.

use instapage_core::{MAX_FONT_SIZE, MIN_FONT_SIZE, TEASER_CHARS, WebsiteData, is_hex_color};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory inside a project that holds local images
pub const ASSETS_DIR: &str = "assets";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    /// True when there are no errors (warnings are allowed)
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn note(&mut self, msg: impl Into<String>) {
        self.info.push(msg.into());
    }
}

/// Validate site data; `root` is the project directory local images are
/// resolved against
pub fn validate_site(data: &WebsiteData, root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_identity(data, &mut report);
    check_theme(data, &mut report);
    check_contact(data, &mut report);
    check_products(data, &mut report);
    check_images(data, root, &mut report);

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated site"
    );

    report
}

fn check_identity(data: &WebsiteData, report: &mut ValidationReport) {
    if data.business_name.trim().is_empty() {
        report.error("Business name is empty");
    }
    if data.title.trim().is_empty() {
        report.warn("Page title is empty; browsers will show the file name");
    }
    if data.about_headline.trim().is_empty() {
        report.warn("Hero headline is empty");
    }
    if data.about_text.chars().count() > TEASER_CHARS {
        report.note(format!(
            "About text is longer than {} characters; the hero shows a shortened teaser",
            TEASER_CHARS
        ));
    }
}

fn check_theme(data: &WebsiteData, report: &mut ValidationReport) {
    if !data.template.is_known() {
        report.warn(format!(
            "Unknown template '{}'; the default style will be used",
            data.template
        ));
    }
    for (label, value) in [
        ("primary_color", &data.primary_color),
        ("accent_color", &data.accent_color),
    ] {
        if !is_hex_color(value) {
            report.error(format!(
                "{} '{}' is not a hex color like #8b5e3c",
                label, value
            ));
        }
    }
    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&data.base_font_size) {
        report.error(format!(
            "base_font_size {} is outside {}-{}",
            data.base_font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
        ));
    }
}

fn check_contact(data: &WebsiteData, report: &mut ValidationReport) {
    if data.email.is_empty() {
        report.warn("Contact email is empty");
    } else if !is_valid_email(&data.email) {
        report.warn(format!("Contact email '{}' does not look valid", data.email));
    }

    let number = data.whatsapp.trim();
    if number.is_empty() {
        report.warn("WhatsApp number is empty; chat buttons will open a blank chat");
    } else if !number
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        report.warn(format!(
            "WhatsApp number '{}' contains characters other than digits",
            data.whatsapp
        ));
    }
}

fn check_products(data: &WebsiteData, report: &mut ValidationReport) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for product in &data.products {
        *counts.entry(product.id.as_str()).or_default() += 1;
        if product.name.trim().is_empty() {
            report.warn(format!("Product '{}' has no name", product.id));
        }
    }

    let mut duplicates: Vec<&str> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id)
        .collect();
    duplicates.sort_unstable();
    for id in duplicates {
        report.error(format!("Duplicate product id '{}'", id));
    }

    if data.show_products && data.products.is_empty() {
        report.note("Product section is enabled but there are no products; it will be hidden");
    }
}

/// Where an image reference points
#[derive(Debug, PartialEq, Eq)]
enum ImageRef<'a> {
    Empty,
    Remote,
    Embedded,
    Local(&'a str),
}

fn classify(reference: &str) -> ImageRef<'_> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        ImageRef::Empty
    } else if trimmed.starts_with("data:") {
        ImageRef::Embedded
    } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") || trimmed.starts_with("//") {
        ImageRef::Remote
    } else {
        ImageRef::Local(trimmed)
    }
}

fn check_images(data: &WebsiteData, root: &Path, report: &mut ValidationReport) {
    let mut refs: Vec<(String, &str)> = vec![
        ("logo".to_string(), data.logo_url.as_str()),
        ("hero image".to_string(), data.hero_image.as_str()),
    ];
    for product in &data.products {
        refs.push((format!("image of product '{}'", product.id), product.image_url.as_str()));
    }

    let mut referenced: HashSet<PathBuf> = HashSet::new();
    let mut embedded = 0;

    for (label, reference) in refs {
        match classify(reference) {
            ImageRef::Empty => report.warn(format!("The {} is empty", label)),
            ImageRef::Remote => {}
            ImageRef::Embedded => embedded += 1,
            ImageRef::Local(path) => {
                let full = root.join(path);
                if !full.exists() {
                    report.error(format!("The {} '{}' does not exist", label, path));
                    continue;
                }
                if let Err(e) = probe_image(&full) {
                    report.warn(format!("The {} '{}' could not be read as an image: {}", label, path, e));
                }
                report.warn(format!(
                    "The {} '{}' is a local file and will not be inside the exported archive; embed it with `instapage embed`",
                    label, path
                ));
                referenced.insert(full.canonicalize().unwrap_or(full));
            }
        }
    }

    if embedded > 0 {
        report.note(format!("{} image(s) are embedded as data URLs", embedded));
    }

    let unused = unused_assets(&root.join(ASSETS_DIR), &referenced);
    if !unused.is_empty() {
        report.note(format!(
            "{} image(s) in {}/ are not used by the site",
            unused.len(),
            ASSETS_DIR
        ));
    }
}

/// Read just enough of an image file to learn its dimensions
fn probe_image(path: &Path) -> Result<(u32, u32), image::ImageError> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        // Vector images are not decoded
        return Ok((0, 0));
    }
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
}

fn unused_assets(assets: &Path, referenced: &HashSet<PathBuf>) -> Vec<PathBuf> {
    if !assets.is_dir() {
        return Vec::new();
    }
    WalkDir::new(assets)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .filter(|p| {
            let canonical = p.canonicalize().unwrap_or_else(|_| p.clone());
            !referenced.contains(&canonical)
        })
        .collect()
}

/// Validate email format
/// Checks for basic RFC 5322 compliance without full regex
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    // Exactly one @
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return false;
    }

    // At least 2 chars after the last dot
    domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use instapage_core::{Product, TemplateId};
    use std::fs;
    use tempfile::TempDir;

    /// Starter data with remote images only
    fn clean_site() -> WebsiteData {
        WebsiteData::starter()
    }

    fn write_png(path: &Path) {
        let img = image::RgbImage::new(4, 4);
        img.save(path).unwrap();
    }

    #[test]
    fn test_starter_site_is_valid() {
        let dir = TempDir::new().unwrap();
        let report = validate_site(&clean_site(), dir.path());
        assert!(report.is_ok(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_long_about_text_notes_teaser() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();

        data.about_text = "a".repeat(TEASER_CHARS);
        let report = validate_site(&data, dir.path());
        assert!(!report.info.iter().any(|i| i.contains("shortened teaser")));

        data.about_text.push('a');
        let report = validate_site(&data, dir.path());
        assert!(report.info.iter().any(|i| i.contains("longer than 180 characters")));
    }

    #[test]
    fn test_empty_business_name_is_error() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.business_name = "  ".to_string();
        let report = validate_site(&data, dir.path());
        assert!(!report.is_ok());
        assert!(report.errors.iter().any(|e| e.contains("Business name")));
    }

    #[test]
    fn test_bad_colors_and_font_size() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.primary_color = "blue".to_string();
        data.base_font_size = 40;
        let report = validate_site(&data, dir.path());
        assert!(report.errors.iter().any(|e| e.contains("primary_color 'blue'")));
        assert!(report.errors.iter().any(|e| e.contains("base_font_size 40")));
    }

    #[test]
    fn test_unknown_template_is_warning() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.template = TemplateId::Unrecognized("glitch".to_string());
        let report = validate_site(&data, dir.path());
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("Unknown template 'glitch'")));
    }

    #[test]
    fn test_duplicate_product_ids() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        let mut copy = data.products[0].clone();
        copy.name = "Copy".to_string();
        data.products.push(copy);
        let report = validate_site(&data, dir.path());
        assert_eq!(report.errors, vec!["Duplicate product id '1'".to_string()]);
    }

    #[test]
    fn test_contact_warnings() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.email = "not-an-email".to_string();
        data.whatsapp = "call me".to_string();
        let report = validate_site(&data, dir.path());
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("does not look valid")));
        assert!(report.warnings.iter().any(|w| w.contains("other than digits")));
    }

    #[test]
    fn test_formatted_whatsapp_number_is_fine() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.whatsapp = "+1 (555) 000-0000".to_string();
        let report = validate_site(&data, dir.path());
        assert!(!report.warnings.iter().any(|w| w.contains("WhatsApp")));
    }

    #[test]
    fn test_enabled_but_empty_products_is_info() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.products.clear();
        let report = validate_site(&data, dir.path());
        assert!(report.info.iter().any(|i| i.contains("no products")));
    }

    #[test]
    fn test_missing_local_image_is_error() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.logo_url = "assets/logo.png".to_string();
        let report = validate_site(&data, dir.path());
        assert!(report.errors.iter().any(|e| e.contains("'assets/logo.png' does not exist")));
    }

    #[test]
    fn test_local_image_is_probed_and_flagged() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(ASSETS_DIR)).unwrap();
        write_png(&dir.path().join("assets/logo.png"));
        fs::write(dir.path().join("assets/broken.png"), b"not an image").unwrap();

        let mut data = clean_site();
        data.logo_url = "assets/logo.png".to_string();
        data.hero_image = "assets/broken.png".to_string();
        let report = validate_site(&data, dir.path());

        assert!(report.is_ok(), "errors: {:?}", report.errors);
        assert!(report.warnings.iter().any(|w| w.contains("broken.png' could not be read")));
        assert!(!report.warnings.iter().any(|w| w.contains("logo.png' could not be read")));
        assert!(report.warnings.iter().any(|w| w.contains("not be inside the exported archive")));
    }

    #[test]
    fn test_unused_assets_are_reported() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets/old")).unwrap();
        write_png(&dir.path().join("assets/logo.png"));
        write_png(&dir.path().join("assets/old/banner.png"));
        fs::write(dir.path().join("assets/notes.txt"), b"ignored").unwrap();

        let mut data = clean_site();
        data.logo_url = "assets/logo.png".to_string();
        let report = validate_site(&data, dir.path());
        assert!(report.info.iter().any(|i| i.contains("1 image(s) in assets/")));
    }

    #[test]
    fn test_embedded_images_are_counted() {
        let dir = TempDir::new().unwrap();
        let mut data = clean_site();
        data.products.push(Product {
            image_url: "data:image/png;base64,AAAA".to_string(),
            ..Product::placeholder()
        });
        let report = validate_site(&data, dir.path());
        assert!(report.info.iter().any(|i| i.contains("1 image(s) are embedded")));
    }

    #[test]
    fn test_classify_references() {
        assert_eq!(classify(""), ImageRef::Empty);
        assert_eq!(classify("https://x.test/a.png"), ImageRef::Remote);
        assert_eq!(classify("data:image/png;base64,AA"), ImageRef::Embedded);
        assert_eq!(classify(" assets/a.png "), ImageRef::Local("assets/a.png"));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("hello@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("missing-at.example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@.example.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("user@example.c"));
    }
}
