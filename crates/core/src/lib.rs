pub mod config;
pub mod editor;
pub mod error;
pub mod types;

pub use config::{SITE_FILE, parse_site_toml, parse_site_toml_str, to_site_toml, write_site_toml};
pub use editor::{
    CopyField, Editor, EditorTab, PreviewRenderer, ProductPatch, ViewMode, WebsiteDataPatch,
};
pub use error::{Error, Result};
pub use types::*;
