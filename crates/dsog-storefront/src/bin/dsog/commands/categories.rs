//! Product categories.

use anyhow::{Context as _, Result};

use super::CategoriesArgs;
use crate::context::Context;
use crate::output::Table;

/// Run the categories command.
pub async fn run(_args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    let spinner = ctx.output.spinner("Fetching categories...");
    let categories = storefront.categories().await;
    spinner.finish_and_clear();
    let categories = categories.context("Failed to fetch categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    if categories.is_empty() {
        ctx.output.info("No categories returned.");
        return Ok(());
    }

    let mut table = Table::new(&[("ID", 6), ("NAME", 24), ("SLUG", 20)]);
    for category in &categories {
        table.row(&[
            category.id.as_str(),
            category.name.as_str(),
            category.slug.as_deref().unwrap_or("-"),
        ]);
    }
    ctx.output.table(&table);

    Ok(())
}
