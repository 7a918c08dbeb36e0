//! DSOG CLI - Command line client for the DSOG STORES catalog.
//!
//! Commands:
//! - `dsog products` - Load and render a collection
//! - `dsog featured` - Featured products from the main collections
//! - `dsog show` - Product detail view
//! - `dsog filters` - Category filters for a collection
//! - `dsog preload` - Warm the collections linked from a page
//! - `dsog settings` / `dsog categories` - Store settings and categories
//! - `dsog order` - Validate and submit an order
//! - `dsog whatsapp` - Build a WhatsApp order link
//! - `dsog franchisees` - List franchisees and the active session

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dsog_storefront::telemetry::{self, LogFormat};
use tracing::level_filters::LevelFilter;

use commands::{
    CategoriesArgs, FeaturedArgs, FiltersArgs, FranchiseesArgs, OrderArgs, PreloadArgs,
    ProductsArgs, SettingsArgs, ShowArgs, WhatsappArgs,
};

/// DSOG CLI - Browse the catalog and place orders
#[derive(Parser)]
#[command(name = "dsog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Franchisee referral code for this run
    #[arg(long = "ref", global = true)]
    referral: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and render a collection
    Products(ProductsArgs),

    /// Show featured products
    Featured(FeaturedArgs),

    /// Show a product's detail view
    Show(ShowArgs),

    /// List category filters for a collection
    Filters(FiltersArgs),

    /// Warm the collections linked from a page
    Preload(PreloadArgs),

    /// Show store settings
    Settings(SettingsArgs),

    /// List product categories
    Categories(CategoriesArgs),

    /// Validate and submit an order
    Order(OrderArgs),

    /// Build a WhatsApp order link
    Whatsapp(WhatsappArgs),

    /// List franchisees
    Franchisees(FranchiseesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    telemetry::init(level, format)?;

    // Setup output formatting
    let output = output::Output::new(cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), cli.referral, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Featured(args) => commands::featured::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Filters(args) => commands::filters::run(args, &ctx).await,
        Commands::Preload(args) => commands::preload::run(args, &ctx).await,
        Commands::Settings(args) => commands::settings::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Whatsapp(args) => commands::whatsapp::run(args, &ctx).await,
        Commands::Franchisees(args) => commands::franchisees::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
