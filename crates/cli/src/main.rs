mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use commands::assist::CopyTarget;
use commands::set::SetArgs;

#[derive(Parser)]
#[command(name = "instapage")]
#[command(version, about = "Single-page business website builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser)]
enum Command {
    /// Create a new site with starter content
    Init {
        /// Site directory (created if missing)
        path: PathBuf,

        /// Business name
        #[arg(long)]
        name: Option<String>,

        /// Template id (see `instapage template list`)
        #[arg(long)]
        template: Option<String>,
    },

    /// Check the site for problems before exporting
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Edit the site in a local preview with live reload
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Write index.html and README.txt to a directory
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for the generated page
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Package the site as <business-name>-site.zip
    Export {
        /// Path to site directory
        path: PathBuf,

        /// Directory to write the archive to (default: the site directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Change site fields
    Set(SetArgs),

    /// Manage products and services
    Product {
        #[command(subcommand)]
        command: ProductCommand,
    },

    /// List templates or switch the site's template
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Embed a local image into the site as a data URL
    Embed {
        /// Path to site directory
        path: PathBuf,

        /// Image to use as the logo
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Image to use as the hero image
        #[arg(long)]
        hero: Option<PathBuf>,
    },

    /// Write and polish copy with the AI assistant
    Assist {
        #[command(subcommand)]
        command: AssistCommand,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
enum ProductCommand {
    /// Append a product with placeholder content
    Add {
        /// Path to site directory
        path: PathBuf,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Change fields of a product
    Update {
        /// Path to site directory
        path: PathBuf,

        /// Product id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Remove a product
    Remove {
        /// Path to site directory
        path: PathBuf,

        /// Product id
        id: String,
    },

    /// List products in page order
    List {
        /// Path to site directory
        path: PathBuf,
    },
}

#[derive(Parser)]
enum TemplateCommand {
    /// Show the available templates
    List,

    /// Switch the site to another template
    Use {
        /// Path to site directory
        path: PathBuf,

        /// Template id
        id: String,
    },
}

#[derive(Parser)]
enum AssistCommand {
    /// Store the API key and model settings
    ///
    /// Get an API key at: https://aistudio.google.com/apikey
    /// The GEMINI_API_KEY environment variable overrides the stored key.
    Configure,

    /// Rewrite one field to be more professional and persuasive
    Improve {
        /// Path to site directory
        path: PathBuf,

        /// Field to improve
        #[arg(value_enum)]
        field: CopyTarget,

        /// Product id (required for product descriptions)
        #[arg(long)]
        product: Option<String>,
    },

    /// Draft headline, about text and product copy from a short description
    Generate {
        /// Path to site directory
        path: PathBuf,

        /// What the business does
        #[arg(short, long)]
        description: String,

        /// Business name (default: the site's business name)
        #[arg(long)]
        name: Option<String>,

        /// Print suggestions without changing the site
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract copy from a mockup or business photo
    AnalyzeImage {
        /// Path to site directory
        path: PathBuf,

        /// Image file to analyze
        image: PathBuf,

        /// Print suggestions without changing the site
        #[arg(long)]
        dry_run: bool,
    },

    /// Research an existing website and import its copy
    AnalyzeUrl {
        /// Path to site directory
        path: PathBuf,

        /// Website URL
        url: String,

        /// Print suggestions without changing the site
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Command::Init {
            path,
            name,
            template,
        } => commands::init::run(path, name, template).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Export { path, output } => commands::export::run(path, output).await,
        Command::Set(args) => commands::set::run(args).await,
        Command::Product { command } => match command {
            ProductCommand::Add {
                path,
                name,
                price,
                description,
                image,
            } => {
                let patch = commands::product::patch(name, price, description, image);
                commands::product::add(path, patch).await
            }
            ProductCommand::Update {
                path,
                id,
                name,
                price,
                description,
                image,
            } => {
                let patch = commands::product::patch(name, price, description, image);
                commands::product::update(path, id, patch).await
            }
            ProductCommand::Remove { path, id } => commands::product::remove(path, id).await,
            ProductCommand::List { path } => commands::product::list(path).await,
        },
        Command::Template { command } => match command {
            TemplateCommand::List => commands::template::list().await,
            TemplateCommand::Use { path, id } => commands::template::use_template(path, id).await,
        },
        Command::Embed { path, logo, hero } => commands::embed::run(path, logo, hero).await,
        Command::Assist { command } => match command {
            AssistCommand::Configure => commands::assist::configure().await,
            AssistCommand::Improve {
                path,
                field,
                product,
            } => commands::assist::improve(path, field, product).await,
            AssistCommand::Generate {
                path,
                description,
                name,
                dry_run,
            } => commands::assist::generate(path, description, name, dry_run).await,
            AssistCommand::AnalyzeImage {
                path,
                image,
                dry_run,
            } => commands::assist::analyze_image(path, image, dry_run).await,
            AssistCommand::AnalyzeUrl { path, url, dry_run } => {
                commands::assist::analyze_url(path, url, dry_run).await
            }
        },
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "instapage", &mut io::stdout());
            Ok(())
        }
    }
}
