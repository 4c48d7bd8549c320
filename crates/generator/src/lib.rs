//! HTML generation and packaging for instapage sites.
//!
//! [`render`] turns a [`WebsiteData`] into one self-contained HTML document;
//! [`package`] wraps that document into a downloadable zip archive.

mod escape;
pub mod package;
pub mod render;
pub mod style;

pub use escape::html_escape;
pub use package::{INDEX_FILE, PackageError, README, README_FILE, SiteArchive, archive_file_name, package};
pub use render::{HtmlRenderer, inject_live_reload, render};
pub use style::{CardStyle, StyleBundle};

pub use instapage_core::WebsiteData;
