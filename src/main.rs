use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use grayscale_mode::api;
use grayscale_mode::assets::{AssetCategory, AssetLoader};
use grayscale_mode::models::Viewer;
use grayscale_mode::server;
use grayscale_mode::services::{FileSettingsProvider, SettingsProvider};

#[derive(Parser)]
#[command(name = "grayscale-mode")]
#[command(about = "Grayscale Mode - site-wide grayscale filter with a visitor opt-out toggle")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render a page to stdout or a file
    Render {
        /// Page slug (defaults to the front page)
        #[arg(short, long)]
        page: Option<String>,

        /// Render the administrative dashboard instead of a page
        #[arg(long, conflicts_with = "page")]
        admin: bool,

        /// Viewer role (e.g. "administrator")
        #[arg(short, long)]
        role: Option<String>,

        /// Output HTML file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load the settings file and print the resolved options
    Check,
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract page and fragment templates
        #[arg(long)]
        templates: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grayscale Mode API",
        description = "Site-wide grayscale filter with a visitor opt-out toggle",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_home,
        api::handle_page,
        api::handle_admin,
        api::handle_settings,
        api::handle_snippet,
    ),
    components(schemas(api::SettingsResponse)),
    tags(
        (name = "Pages", description = "Site pages with the grayscale layer"),
        (name = "Settings", description = "Resolved settings and embeddable markup")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            page,
            admin,
            role,
            output,
        }) => run_render_command(page.as_deref(), admin, role.as_deref(), output.as_ref()),
        Some(Commands::Check) => run_check_command(),
        Some(Commands::Init {
            templates,
            config,
            all,
            force,
            list,
        }) => run_init_command(templates, config, all, force, list),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grayscale_mode=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Create an asset loader and seed configured-but-empty paths
fn load_assets() -> Arc<AssetLoader> {
    let asset_loader = Arc::new(AssetLoader::from_env());

    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                templates = report.templates_seeded.len(),
                config = report.config_seeded,
                "Seeded empty paths with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    asset_loader
}

/// Render a page directly (no server needed)
fn run_render_command(
    page: Option<&str>,
    admin: bool,
    role: Option<&str>,
    output: Option<&PathBuf>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let asset_loader = load_assets();
    let state = server::create_app_state(asset_loader)?;
    let settings = state.settings.settings();
    let viewer = Viewer::from_role(role);

    let html = if admin {
        state.pages.render_admin(&settings, &viewer)
    } else {
        state.pages.render_public(&settings, page, &viewer)
    }
    .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    match output {
        Some(path) => {
            std::fs::write(path, &html)?;
            println!("Rendered {} ({} bytes)", path.display(), html.len());
        }
        None => print!("{html}"),
    }

    Ok(())
}

/// Print the resolved settings and anything that had to be adjusted
fn run_check_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let asset_loader = Arc::new(AssetLoader::from_env());
    let settings = FileSettingsProvider::new(asset_loader).settings();
    let config = &settings.config;

    println!("Settings: {}\n", settings.source);
    println!("  enabled        = {}", config.enabled);
    println!("  intensity      = {}", config.intensity);
    println!("  apply_admin    = {}", config.apply_to_admin);
    println!("  allow_toggle   = {}", config.allow_visitor_toggle);
    println!("  show_adminbar  = {}", config.show_in_host_chrome);
    println!("  button_label   = {:?}", config.button_label);
    println!("  pages          = {}", settings.site.pages.len());

    if settings.adjustments.is_empty() {
        println!("\nNo adjustments needed.");
    } else {
        println!("\nAdjusted {} value(s):", settings.adjustments.len());
        for adjustment in &settings.adjustments {
            println!("  ~ {adjustment}");
        }
    }

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    templates: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Templates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    // Determine which categories to extract
    let mut categories = Vec::new();
    if all || templates {
        categories.push(AssetCategory::Templates);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --templates, or --config");
        eprintln!("\nRun 'grayscale-mode init --list' to see embedded assets.");
        std::process::exit(1);
    }

    // Paths from env vars (or defaults)
    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let templates_dir = std::env::var("TEMPLATES_DIR").ok();

    println!("Grayscale Mode v{VERSION}");
    println!("Site-wide grayscale filter with a visitor opt-out toggle\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR     = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEMPLATES_DIR = {}",
        templates_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");
    let loader = AssetLoader::from_env();
    println!("  Config:    {}", loader.config_source());

    let embedded_count = AssetLoader::list_embedded(AssetCategory::Templates).len();
    match loader.templates_dir() {
        Some(dir) if dir.exists() => {
            let count = loader.list_templates().len();
            println!(
                "  Templates: {} ({count} files, {embedded_count} embedded)",
                dir.display()
            );
        }
        _ => println!("  Templates: embedded ({embedded_count} files)"),
    }

    println!("\nCommands:");
    println!("  grayscale-mode serve    Start the HTTP server");
    println!("  grayscale-mode render   Render a page to HTML");
    println!("  grayscale-mode check    Show the resolved settings");
    println!("  grayscale-mode init     Extract embedded assets");
    println!("\nRun 'grayscale-mode --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grayscale_mode=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = load_assets();

    tracing::info!(
        templates = ?asset_loader
            .templates_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        config = %asset_loader.config_source(),
        "Asset sources configured"
    );

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Grayscale Mode server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
