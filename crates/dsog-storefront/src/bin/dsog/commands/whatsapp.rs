//! Build a WhatsApp order link.

use anyhow::{bail, Result};
use dsog_commerce::Price;

use super::WhatsappArgs;
use crate::context::Context;

/// Run the whatsapp command.
pub async fn run(args: WhatsappArgs, ctx: &Context) -> Result<()> {
    if !args.price.is_finite() || args.price < 0.0 {
        bail!("Price must be a non-negative number");
    }

    let storefront = ctx.storefront()?;
    let message =
        storefront.whatsapp_order(&args.name, Price::new(args.price), &args.collection);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "number": message.number,
            "text": message.text,
            "link": message.link(),
        }));
        return Ok(());
    }

    if args.url {
        ctx.output.raw(&message.link());
        return Ok(());
    }

    ctx.output.header("WhatsApp order");
    ctx.output.kv("To", &message.number);
    if let Some(franchisee) = storefront.context().session.current() {
        ctx.output.kv("Via", &format!("{} ({})", franchisee.name, franchisee.location));
    }
    println!();
    for line in message.text.lines() {
        println!("    {}", line);
    }
    println!();
    ctx.output.kv("Link", &message.link());

    Ok(())
}
