use anyhow::Result;
use instapage_validator::{ValidationReport, validate_site};
use std::path::PathBuf;

use super::site;

pub async fn run(path: PathBuf) -> Result<()> {
    println!("Validating site at: {}", path.display());

    let data = site::load(&path)?;
    println!("✓ site.toml valid");
    println!("  Site: {} ({} template)", data.business_name, data.template);
    println!("  Products: {}", data.products.len());
    println!();

    let report = validate_site(&data, &path);
    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("✅ Ready to export");
    Ok(())
}

pub fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        println!("   ❌ {}", error);
    }
    for warning in &report.warnings {
        println!("   ⚠ {}", warning);
    }
    for info in &report.info {
        println!("   💡 {}", info);
    }
    if !(report.errors.is_empty() && report.warnings.is_empty() && report.info.is_empty()) {
        println!();
    }
}
