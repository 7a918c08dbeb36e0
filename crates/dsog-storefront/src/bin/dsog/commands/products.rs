//! Load and render a collection.

use anyhow::Result;
use dsog_storefront::Storefront;
use dsog_ui::html;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::source_badge;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let app = ctx.app()?;
    let app = if args.eager {
        app.without_lazy_images()
    } else {
        app
    };
    let storefront = Storefront::new(app);

    let spinner = ctx.output.spinner(&format!("Loading {}...", args.collection));
    let view = match args.category.as_deref() {
        Some(category) => storefront.load_filtered(&args.collection, category).await,
        None => storefront.load_collection(&args.collection).await,
    };
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    if args.html {
        ctx.output.raw(&html::render(&view.rendered));
        return Ok(());
    }

    ctx.output.header(&format!("Collection: {}", view.collection));
    ctx.output.kv("Source", &source_badge(view.source));
    if let Some(category) = &args.category {
        ctx.output.kv("Category", category);
    }
    ctx.output.kv("Products", &view.rendered.cards().len().to_string());
    println!();
    ctx.output.rendered(&view.rendered);

    Ok(())
}
