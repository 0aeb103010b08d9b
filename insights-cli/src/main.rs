//! Retail Insights CLI - customer churn, product return and sales forecast views over CSV exports

// Global invariants enforced:
// - Views go to stdout, logs go to stderr
// - A missing or unreadable export never fails a command; sample data is shown instead

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use insights_core::config::{self, ResolvedConfig};
use insights_core::filter::{Category, RiskLevel, Segment, Selection};
use insights_core::report::{
    render_customers_text, render_json, render_kpi_text, render_products_text, render_sales_text,
};
use insights_core::{
    kpi_summary, CustomerFilter, CustomerView, DirSource, Page, PageSession, ProductFilter,
    ProductView, SalesView,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "insights")]
#[command(about = "Customer, product and sales insights from BI dashboard CSV exports")]
#[command(version = env!("INSIGHTS_VERSION"))]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Directory with the CSV exports (overrides config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config file (default: auto-discover)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// High-risk customers, segment and churn-risk distributions
    Customers {
        /// Segment: vip, recent, unhappy, inactive or all
        #[arg(long, default_value = "all")]
        segment: Selection<Segment>,

        /// Churn risk: high, medium, low or all
        #[arg(long, default_value = "all")]
        risk: Selection<RiskLevel>,
    },
    /// High-risk products, return-risk distribution and category ranking
    Products {
        /// Return risk: high, medium, low or all
        #[arg(long, default_value = "all")]
        risk: Selection<RiskLevel>,

        /// Product category name or all
        #[arg(long, default_value = "all")]
        category: Selection<Category>,
    },
    /// Sales forecast table and monthly, weekly and weekday series
    Sales,
    /// Headline KPI figures across all exports
    Kpi,
    /// Validate or show the configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without loading any data
    Validate,
    /// Show the resolved configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the data directory: CLI flag first, then config, anchored at the project root
fn data_dir(global: &GlobalArgs, resolved: &ResolvedConfig, project_root: &Path) -> PathBuf {
    match &global.data_dir {
        Some(dir) if dir.is_relative() => project_root.join(dir),
        Some(dir) => dir.clone(),
        None => resolved.data_dir_in(project_root),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let project_root = std::env::current_dir()?;

    let command = match cli.command {
        Commands::Config { action } => {
            return handle_config(&action, &project_root, cli.global.config.as_deref());
        }
        command => command,
    };

    let resolved = config::load_and_resolve(&project_root, cli.global.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(config_path) = &resolved.config_path {
        eprintln!("Using config: {}", config_path.display());
    }

    let source = DirSource::new(data_dir(&cli.global, &resolved, &project_root));
    tracing::debug!(data_dir = %source.base().display(), "reading exports");
    let files = &resolved.files;
    let options = &resolved.views;

    let output = match command {
        Commands::Customers { segment, risk } => {
            let session = PageSession::load(Page::Customers, &source, files);
            let view = CustomerView::build(&session, &CustomerFilter { segment, risk }, options);
            match cli.global.format {
                OutputFormat::Text => render_customers_text(&view),
                OutputFormat::Json => render_json(&view),
            }
        }
        Commands::Products { risk, category } => {
            let session = PageSession::load(Page::Products, &source, files);
            let view = ProductView::build(&session, &ProductFilter { risk, category }, options);
            match cli.global.format {
                OutputFormat::Text => render_products_text(&view),
                OutputFormat::Json => render_json(&view),
            }
        }
        Commands::Sales => {
            let session = PageSession::load(Page::Sales, &source, files);
            let view = SalesView::build(&session, options);
            match cli.global.format {
                OutputFormat::Text => render_sales_text(&view),
                OutputFormat::Json => render_json(&view),
            }
        }
        Commands::Kpi => {
            let kpi = kpi_summary(&source, files);
            match cli.global.format {
                OutputFormat::Text => render_kpi_text(&kpi),
                OutputFormat::Json => render_json(&kpi),
            }
        }
        Commands::Config { .. } => return Ok(()),
    };

    match cli.global.format {
        OutputFormat::Text => print!("{}", output),
        OutputFormat::Json => println!("{}", output),
    }

    Ok(())
}

fn handle_config(
    action: &ConfigAction,
    project_root: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Validate => {
            match config::load_and_resolve(project_root, config_path) {
                Ok(config) => {
                    if let Some(ref p) = config.config_path {
                        println!("Config valid: {}", p.display());
                    } else {
                        println!("No config file found. Using defaults.");
                    }
                }
                Err(e) => {
                    eprintln!("Config validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Show => {
            let resolved = config::load_and_resolve(project_root, config_path)
                .context("failed to load configuration")?;

            println!("Configuration:");
            if let Some(ref p) = resolved.config_path {
                println!("  Source: {}", p.display());
            } else {
                println!("  Source: defaults (no config file found)");
            }
            println!();
            println!("Data:");
            println!("  data_dir: {}", resolved.data_dir_in(project_root).display());
            println!("  customers: {}", resolved.files.customers);
            println!("  products: {}", resolved.files.products);
            println!("  categories: {}", resolved.files.categories);
            println!("  sales: {}", resolved.files.sales);
            println!();
            println!("Views:");
            println!(
                "  high_churn_probability: {}",
                resolved.views.high_churn_probability
            );
            println!("  top_categories: {}", resolved.views.top_categories);
            println!();
            println!("Table rows:");
            println!("  customers: {}", resolved.views.customer_rows);
            println!("  products: {}", resolved.views.product_rows);
            println!("  sales: {}", resolved.views.sales_rows);
        }
    }
    Ok(())
}
