//! CLI command implementations.

pub mod categories;
pub mod featured;
pub mod filters;
pub mod franchisees;
pub mod order;
pub mod preload;
pub mod products;
pub mod settings;
pub mod show;
pub mod whatsapp;

use clap::Args;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Collection name (mens, womens, kids, accessories, gifts).
    pub collection: String,

    /// Only show products in this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Print the rendered HTML instead of a table.
    #[arg(long)]
    pub html: bool,

    /// Render images eagerly, as when no visibility observer exists.
    #[arg(long)]
    pub eager: bool,
}

/// Arguments for the featured command.
#[derive(Args)]
pub struct FeaturedArgs {
    /// Print the rendered HTML instead of a table.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Collection the product is in.
    pub collection: String,

    /// Product id.
    pub product: String,

    /// Zero-based image to display.
    #[arg(short, long, default_value = "0")]
    pub image: usize,

    /// Show the image zoomed.
    #[arg(long)]
    pub zoom: bool,

    /// Print the rendered HTML instead of a summary.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the filters command.
#[derive(Args)]
pub struct FiltersArgs {
    /// Collection name.
    pub collection: String,
}

/// Arguments for the preload command.
#[derive(Args)]
pub struct PreloadArgs {
    /// Page path, e.g. `/mens.html` or `/`.
    #[arg(default_value = "/")]
    pub path: String,
}

/// Arguments for the settings command.
#[derive(Args)]
pub struct SettingsArgs {}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// JSON file holding the order request.
    pub file: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Validate and show totals without submitting.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the whatsapp command.
#[derive(Args)]
pub struct WhatsappArgs {
    /// Product name.
    pub name: String,

    /// Product price.
    pub price: f64,

    /// Collection the product is from.
    #[arg(short, long, default_value = "general")]
    pub collection: String,

    /// Print only the link.
    #[arg(long)]
    pub url: bool,
}

/// Arguments for the franchisees command.
#[derive(Args)]
pub struct FranchiseesArgs {
    /// Forget the remembered franchisee.
    #[arg(long)]
    pub clear: bool,
}
