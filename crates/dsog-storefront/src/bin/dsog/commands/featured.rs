//! Featured products.

use anyhow::Result;
use dsog_ui::html;

use super::FeaturedArgs;
use crate::context::Context;
use crate::output::source_badge;

/// Run the featured command.
pub async fn run(args: FeaturedArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    let spinner = ctx.output.spinner("Loading featured products...");
    let view = storefront.featured().await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    if args.html {
        ctx.output.raw(&html::render(&view.rendered));
        return Ok(());
    }

    ctx.output.header("Featured products");
    for (collection, source) in &view.sources {
        ctx.output.kv(collection, &source_badge(*source));
    }
    println!();
    ctx.output.rendered(&view.rendered);

    Ok(())
}
