use anyhow::{Context, Result};
use clap::ValueEnum;
use instapage_assistant::{
    AssistantConfig, ContentSuggestions, CopyAssistant, GeminiClient, ImageInput,
    apply_suggestions, improve_field,
};
use instapage_core::{CopyField, Editor};
use instapage_generator::HtmlRenderer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::site;

const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Field selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CopyTarget {
    Title,
    BusinessName,
    Headline,
    About,
    /// A product description (needs --product)
    Product,
}

impl CopyTarget {
    fn field(self, product: Option<String>) -> Result<CopyField> {
        Ok(match self {
            CopyTarget::Title => CopyField::Title,
            CopyTarget::BusinessName => CopyField::BusinessName,
            CopyTarget::Headline => CopyField::Headline,
            CopyTarget::About => CopyField::About,
            CopyTarget::Product => CopyField::ProductDescription(
                product.context("--product <id> is required to improve a product description")?,
            ),
        })
    }
}

/// Get path to global config file
fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    let config_dir = PathBuf::from(home).join(".instapage");
    fs::create_dir_all(&config_dir)?;
    Ok(config_dir.join("config.toml"))
}

/// Load global config
fn load_config() -> Result<Option<GlobalConfig>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path).context("Failed to read config file")?;
    let config: GlobalConfig = toml::from_str(&contents).context("Failed to parse config file")?;
    Ok(Some(config))
}

/// Save global config
fn save_config(config: &GlobalConfig) -> Result<()> {
    let path = config_path()?;
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&path, contents).context("Failed to write config file")?;
    println!("✅ Configuration saved to: {}", path.display());
    Ok(())
}

/// Stored settings with the environment key taking precedence
fn resolve_config(stored: Option<GlobalConfig>, env_key: Option<String>) -> AssistantConfig {
    let mut config = stored.unwrap_or_default().assistant;
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = key;
    }
    config
}

fn client() -> Result<GeminiClient> {
    let config = resolve_config(load_config()?, std::env::var(API_KEY_ENV).ok());
    Ok(GeminiClient::new(config)?)
}

fn read_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn prompt_with_default(label: &str, current: &str) -> Result<String> {
    let input = read_input(&format!("{} [current: {}]: ", label, current))?;
    Ok(if input.is_empty() {
        current.to_string()
    } else {
        input
    })
}

/// Configure the assistant API key and models
pub async fn configure() -> Result<()> {
    println!("🔧 Configuring the copy assistant...\n");

    let existing = load_config()?.unwrap_or_default().assistant;

    println!("📋 You'll need:");
    println!("   1. A Gemini API key");
    println!("      Create at: https://aistudio.google.com/apikey");
    println!("   {} overrides the stored key when set", API_KEY_ENV);
    println!();

    let api_key = if !existing.api_key.is_empty() {
        let shown: String = existing.api_key.chars().take(6).collect();
        let input = read_input(&format!("API Key [current: {}...]: ", shown))?;
        if input.is_empty() {
            existing.api_key.clone()
        } else {
            input
        }
    } else {
        read_input("API Key: ")?
    };

    if api_key.is_empty() {
        anyhow::bail!("API key is required");
    }

    let model = prompt_with_default("Model", &existing.model)?;
    let research_model = prompt_with_default("Research model (URL analysis)", &existing.research_model)?;

    let config = GlobalConfig {
        assistant: AssistantConfig {
            api_key,
            model,
            research_model,
            endpoint: existing.endpoint,
        },
    };

    save_config(&config)?;

    println!();
    println!("🚀 Ready! Try: instapage assist generate <site-dir> --description \"...\"");
    Ok(())
}

/// Rewrite one copy field
pub async fn improve(path: PathBuf, target: CopyTarget, product: Option<String>) -> Result<()> {
    let field = target.field(product)?;
    let assistant = client()?;
    let mut editor = Editor::new(site::load(&path)?, HtmlRenderer);

    println!("✨ Improving copy...");
    let changed = improve_field(&mut editor, &field, &assistant)
        .await
        .context("Assistant request failed")?;

    if !changed {
        println!("   Field is empty, nothing to improve");
        return Ok(());
    }

    site::save(&path, editor.data())?;
    if let Some(text) = field.read(editor.data()) {
        println!("   ✓ {}", text);
    }
    Ok(())
}

/// Draft copy from a business description
pub async fn generate(
    path: PathBuf,
    description: String,
    name: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let assistant = client()?;
    let mut editor = Editor::new(site::load(&path)?, HtmlRenderer);
    let name = name.unwrap_or_else(|| editor.data().business_name.clone());

    println!("✨ Writing copy for {}...", name);
    editor.begin_assist()?;
    let result = assistant.enhance_content(&description, &name).await;
    editor.finish_assist();
    let suggestions = result.context("Assistant request failed")?;

    apply_and_save(&path, &mut editor, &suggestions, dry_run)?;
    Ok(())
}

/// Extract copy from a mockup or photo
pub async fn analyze_image(path: PathBuf, image: PathBuf, dry_run: bool) -> Result<()> {
    let assistant = client()?;
    let mut editor = Editor::new(site::load(&path)?, HtmlRenderer);
    let input = ImageInput::load(&image)
        .await
        .with_context(|| format!("Failed to load {}", image.display()))?;

    println!("🔍 Analyzing {}...", image.display());
    editor.begin_assist()?;
    let result = assistant.analyze_image(&input).await;
    editor.finish_assist();
    let suggestions = result.context("Assistant request failed")?;

    apply_and_save(&path, &mut editor, &suggestions, dry_run)?;
    Ok(())
}

/// Import copy from an existing website
pub async fn analyze_url(path: PathBuf, url: String, dry_run: bool) -> Result<()> {
    let assistant = client()?;
    let mut editor = Editor::new(site::load(&path)?, HtmlRenderer);

    println!("🌐 Researching {}...", url);
    editor.begin_assist()?;
    let result = assistant.analyze_url(&url).await;
    editor.finish_assist();
    let suggestions = result.context("Assistant request failed")?;

    apply_and_save(&path, &mut editor, &suggestions, dry_run)?;
    Ok(())
}

fn print_suggestions(suggestions: &ContentSuggestions) {
    if let Some(name) = suggestions.business_name.as_deref().filter(|n| !n.is_empty()) {
        println!("   Business: {}", name);
    }
    if !suggestions.headline.is_empty() {
        println!("   Headline: {}", suggestions.headline);
    }
    if !suggestions.about_text.is_empty() {
        println!("   About:\n{}", indent(&suggestions.about_text));
    }
    for (i, description) in suggestions.product_descriptions.iter().enumerate() {
        println!("   Product {}: {}", i + 1, description);
    }
    if !suggestions.source_urls.is_empty() {
        println!("   Sources:");
        for url in &suggestions.source_urls {
            println!("     - {}", url);
        }
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("     {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print suggestions and, unless `dry_run`, merge them into the site
///
/// Returns whether the site file was written.
fn apply_and_save(
    path: &Path,
    editor: &mut Editor<HtmlRenderer>,
    suggestions: &ContentSuggestions,
    dry_run: bool,
) -> Result<bool> {
    if suggestions.is_empty() {
        println!("   ⚠ The assistant returned nothing usable; site unchanged");
        return Ok(false);
    }

    print_suggestions(suggestions);
    println!();

    if dry_run {
        println!("Dry run: site unchanged");
        return Ok(false);
    }

    apply_suggestions(editor, suggestions);
    site::save(path, editor.data())?;
    println!("✓ Updated {}", site::site_file(path).display());
    Ok(true)
}
