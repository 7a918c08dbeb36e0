//! Warm the collections linked from a page.

use anyhow::{Context as _, Result};
use dsog_commerce::catalog::Page;
use futures::future::try_join_all;
use serde::Serialize;

use super::PreloadArgs;
use crate::context::Context;
use crate::output::source_badge;

#[derive(Serialize)]
struct Preloaded {
    collection: String,
    source: dsog_storefront::CatalogSource,
}

/// Run the preload command.
pub async fn run(args: PreloadArgs, ctx: &Context) -> Result<()> {
    let page = Page::from_path(&args.path);
    let collections = ctx.config.preload_for(&page).to_vec();
    let storefront = ctx.storefront()?;

    ctx.output.header(&format!("Preloading for page '{}'", page.key()));
    let spinner = ctx.output.spinner("Warming collections...");
    let sources = try_join_all(storefront.preload(&page))
        .await
        .context("Preload task failed")?;
    spinner.finish_and_clear();

    let results: Vec<Preloaded> = collections
        .into_iter()
        .zip(sources)
        .map(|(collection, source)| Preloaded { collection, source })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    for result in &results {
        ctx.output.kv(&result.collection, &source_badge(result.source));
    }
    ctx.output.success(&format!("Warmed {} collections", results.len()));

    Ok(())
}
