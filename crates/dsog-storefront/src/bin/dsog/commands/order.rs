//! Validate and submit an order.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use dsog_commerce::checkout::{OrderNumber, OrderRequest};

use super::OrderArgs;
use crate::context::Context;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read order file: {}", path.display()))?;
    let order: OrderRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse order file: {}", path.display()))?;

    order.validate()?;
    let totals = order.totals();

    ctx.output.header("Order summary");
    if let Some(name) = &order.customer_name {
        ctx.output.kv("Customer", name);
    }
    for item in &order.items {
        ctx.output.list_item(&format!(
            "{} x{} @ {} = {}",
            item.name,
            item.quantity,
            item.price.display(),
            item.line_total().display()
        ));
    }
    ctx.output.kv("Delivery", order.delivery_option.as_str());
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv("Delivery fee", &totals.delivery_fee.display());
    ctx.output.kv("Total", &totals.total.display());

    if args.dry_run {
        ctx.output.kv("Order number (example)", OrderNumber::today().as_str());
        ctx.output.success("Order is valid (dry run, not submitted)");
        if ctx.output.is_json() {
            ctx.output.json(&totals);
        }
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Submit this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let storefront = ctx.storefront()?;
    let spinner = ctx.output.spinner("Submitting order...");
    let response = storefront.submit_order(order).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&response);
    }

    if !response.success {
        bail!(
            "Order rejected: {}",
            response.error.as_deref().unwrap_or("unknown error")
        );
    }

    if let Some(number) = &response.order_number {
        ctx.output.success(&format!("Order {} submitted", number));
    }
    Ok(())
}
