//! Editor state container.
//!
//! Owns the site data plus the view state of an editing session and keeps a
//! rendered preview in sync with every change to the data.

use crate::error::{Error, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Produces the preview document for a site
///
/// Implemented by the HTML generator. The editor calls it after every data
/// change so the cached preview never lags behind the data.
pub trait PreviewRenderer {
    fn render(&self, data: &WebsiteData) -> String;
}

/// Editor section currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    #[default]
    Design,
    Content,
    Products,
    Contact,
}

/// Device the preview frame imitates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Desktop,
    Mobile,
}

impl ViewMode {
    /// Fixed frame size in CSS pixels, `None` when the frame fills the window
    pub fn frame_size(self) -> Option<(u32, u32)> {
        match self {
            ViewMode::Desktop => None,
            ViewMode::Mobile => Some((375, 667)),
        }
    }
}

/// Partial update of [`WebsiteData`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebsiteDataPatch {
    pub title: Option<String>,
    pub business_name: Option<String>,
    pub logo_url: Option<String>,
    pub hero_image: Option<String>,
    pub about_headline: Option<String>,
    pub about_text: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub products: Option<Vec<Product>>,
    pub template: Option<TemplateId>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub base_font_size: Option<u8>,
    pub show_products: Option<bool>,
}

impl WebsiteDataPatch {
    pub fn is_empty(&self) -> bool {
        *self == WebsiteDataPatch::default()
    }

    /// Check a replacement product list before it reaches the site
    ///
    /// Product ids must be non-blank and unique, the same rule the site file
    /// loader enforces. The merge itself stays unchecked.
    pub fn check(&self) -> Result<()> {
        let Some(products) = &self.products else {
            return Ok(());
        };
        let mut seen = HashSet::new();
        for product in products {
            if product.id.trim().is_empty() {
                return Err(Error::InvalidData(format!(
                    "Product '{}' has no id",
                    product.name
                )));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(Error::InvalidData(format!(
                    "Duplicate product id '{}'",
                    product.id
                )));
            }
        }
        Ok(())
    }

    /// Shallow merge into `data`
    pub fn merge_into(self, data: &mut WebsiteData) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = self.$field {
                        data.$field = value;
                    }
                )*
            };
        }

        merge!(
            title,
            business_name,
            logo_url,
            hero_image,
            about_headline,
            about_text,
            email,
            phone,
            whatsapp,
            address,
            products,
            template,
            primary_color,
            accent_color,
            show_products,
        );

        if let Some(size) = self.base_font_size {
            data.base_font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
    }
}

/// Partial update of a single [`Product`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    fn merge_into(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
    }
}

/// Text fields the copy assistant can rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyField {
    Title,
    BusinessName,
    Headline,
    About,
    ProductDescription(String),
}

impl CopyField {
    /// Current value of the field, `None` when it names a missing product
    pub fn read<'a>(&self, data: &'a WebsiteData) -> Option<&'a str> {
        match self {
            CopyField::Title => Some(&data.title),
            CopyField::BusinessName => Some(&data.business_name),
            CopyField::Headline => Some(&data.about_headline),
            CopyField::About => Some(&data.about_text),
            CopyField::ProductDescription(id) => data.product(id).map(|p| p.description.as_str()),
        }
    }
}

/// Editing session over one site
pub struct Editor<R: PreviewRenderer> {
    data: WebsiteData,
    renderer: R,
    preview: String,
    revision: u64,
    tab: EditorTab,
    view_mode: ViewMode,
    preview_open: bool,
    assist_busy: bool,
}

impl<R: PreviewRenderer> Editor<R> {
    pub fn new(data: WebsiteData, renderer: R) -> Self {
        let preview = renderer.render(&data);
        Self {
            data,
            renderer,
            preview,
            revision: 0,
            tab: EditorTab::default(),
            view_mode: ViewMode::default(),
            preview_open: false,
            assist_busy: false,
        }
    }

    pub fn data(&self) -> &WebsiteData {
        &self.data
    }

    pub fn into_data(self) -> WebsiteData {
        self.data
    }

    /// Rendered preview of the current data
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Counter bumped by every data change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merge a partial update; returns the new revision
    pub fn apply(&mut self, patch: WebsiteDataPatch) -> u64 {
        patch.merge_into(&mut self.data);
        self.changed()
    }

    /// Swap in a completely new record (e.g. after the site file changed)
    pub fn replace(&mut self, data: WebsiteData) -> u64 {
        self.data = data;
        self.changed()
    }

    /// Append a placeholder product and return its id
    pub fn add_product(&mut self) -> String {
        let product = Product::placeholder();
        let id = product.id.clone();
        self.data.products.push(product);
        self.changed();
        id
    }

    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> Result<()> {
        let product = self
            .data
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::ProductNotFound(id.to_string()))?;
        patch.merge_into(product);
        self.changed();
        Ok(())
    }

    pub fn remove_product(&mut self, id: &str) -> Result<Product> {
        let index = self
            .data
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::ProductNotFound(id.to_string()))?;
        let removed = self.data.products.remove(index);
        self.changed();
        Ok(removed)
    }

    /// Write new text into a copy field
    pub fn set_copy(&mut self, field: &CopyField, text: String) -> Result<()> {
        match field {
            CopyField::Title => self.data.title = text,
            CopyField::BusinessName => self.data.business_name = text,
            CopyField::Headline => self.data.about_headline = text,
            CopyField::About => self.data.about_text = text,
            CopyField::ProductDescription(id) => {
                return self.update_product(
                    id,
                    ProductPatch {
                        description: Some(text),
                        ..Default::default()
                    },
                );
            }
        }
        self.changed();
        Ok(())
    }

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview_open
    }

    pub fn open_preview(&mut self) {
        self.preview_open = true;
    }

    pub fn close_preview(&mut self) {
        self.preview_open = false;
    }

    pub fn is_assist_busy(&self) -> bool {
        self.assist_busy
    }

    /// Claim the assistant for one request
    pub fn begin_assist(&mut self) -> Result<()> {
        if self.assist_busy {
            return Err(Error::AssistantBusy);
        }
        self.assist_busy = true;
        Ok(())
    }

    pub fn finish_assist(&mut self) {
        self.assist_busy = false;
    }

    fn changed(&mut self) -> u64 {
        self.revision += 1;
        self.preview = self.renderer.render(&self.data);
        tracing::debug!(revision = self.revision, bytes = self.preview.len(), "preview refreshed");
        self.revision
    }
}
