use anyhow::Result;
use instapage_core::{Editor, ProductPatch};
use instapage_generator::HtmlRenderer;
use std::path::{Path, PathBuf};

use super::site;

pub fn patch(
    name: Option<String>,
    price: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
) -> ProductPatch {
    ProductPatch {
        name,
        price,
        description,
        image_url,
    }
}

fn open(path: &Path) -> Result<Editor<HtmlRenderer>> {
    Ok(Editor::new(site::load(path)?, HtmlRenderer))
}

/// Append a placeholder product, then apply any given fields to it
pub async fn add(path: PathBuf, fields: ProductPatch) -> Result<()> {
    let mut editor = open(&path)?;
    let id = editor.add_product();
    if fields != ProductPatch::default() {
        editor.update_product(&id, fields)?;
    }
    site::save(&path, editor.data())?;

    println!("✓ Added product {} ({} total)", id, editor.data().products.len());
    Ok(())
}

pub async fn update(path: PathBuf, id: String, fields: ProductPatch) -> Result<()> {
    if fields == ProductPatch::default() {
        anyhow::bail!("Nothing to change. Pass --name, --price, --description or --image");
    }
    let mut editor = open(&path)?;
    editor.update_product(&id, fields)?;
    site::save(&path, editor.data())?;

    println!("✓ Updated product {}", id);
    Ok(())
}

pub async fn remove(path: PathBuf, id: String) -> Result<()> {
    let mut editor = open(&path)?;
    let removed = editor.remove_product(&id)?;
    site::save(&path, editor.data())?;

    println!("✓ Removed product {} ({})", id, removed.name);
    Ok(())
}

pub async fn list(path: PathBuf) -> Result<()> {
    let data = site::load(&path)?;

    if data.products.is_empty() {
        println!("No products yet. Add one with 'instapage product add {}'", path.display());
        return Ok(());
    }

    if !data.show_products {
        println!("⚠ The product section is hidden (show_products = false)\n");
    }
    for (i, product) in data.products.iter().enumerate() {
        println!("{:>2}. {} [{}]", i + 1, product.name, product.id);
        println!("    {}  {}", product.price, product.description);
    }
    Ok(())
}
