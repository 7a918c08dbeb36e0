//! Product detail view.

use anyhow::{bail, Result};
use dsog_ui::{html, CardTarget, Modal};

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    let spinner = ctx.output.spinner(&format!("Loading {}...", args.collection));
    let view = storefront.load_collection(&args.collection).await;
    spinner.finish_and_clear();

    let Some(card) = view
        .rendered
        .cards()
        .iter()
        .find(|card| card.product_id == args.product)
    else {
        bail!(
            "Product '{}' not found in collection '{}'",
            args.product,
            args.collection
        );
    };

    let mut modal = Modal::new();
    storefront.handle_intent(card.click(CardTarget::Body), &mut modal);
    if args.image > 0 && !modal.select(args.image) {
        ctx.output.warn(&format!(
            "Product has no image {}, showing image 0",
            args.image
        ));
    }
    if args.zoom {
        modal.toggle_zoom();
    }

    let Some(detail) = modal.view() else {
        bail!("Product view could not be opened");
    };

    if ctx.output.is_json() {
        ctx.output.json(&detail);
        return Ok(());
    }

    if args.html {
        ctx.output.raw(&html::render_modal(&detail));
        return Ok(());
    }

    ctx.output.header(&detail.title);
    ctx.output.kv("Price", &detail.price_label);
    ctx.output.kv("Category", &detail.badge);
    ctx.output.kv("Description", &detail.description);
    ctx.output.kv("Image", &detail.primary_image);
    for thumb in &detail.thumbnails {
        let marker = if thumb.active { " (active)" } else { "" };
        ctx.output.list_item(&format!("[{}] {}{}", thumb.index, thumb.src, marker));
    }

    let order = storefront.order_action(&detail.order);
    ctx.output.kv("Order", &order.link());

    Ok(())
}
