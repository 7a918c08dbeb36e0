//! Franchisee directory and session.

use anyhow::{Context as _, Result};
use dsog_storefront::{FranchiseeSession, SessionStore};
use serde::Serialize;

use super::FranchiseesArgs;
use crate::context::Context;
use crate::output::Table;

#[derive(Serialize)]
struct Listing<'a> {
    code: &'a str,
    name: &'a str,
    phone: &'a str,
    location: &'a str,
    active: bool,
}

/// Run the franchisees command.
pub async fn run(args: FranchiseesArgs, ctx: &Context) -> Result<()> {
    let store = ctx.session_store();

    if args.clear {
        store
            .clear()
            .with_context(|| format!("Failed to clear {}", store.path().display()))?;
        ctx.output.success("Franchisee session cleared");
        return Ok(());
    }

    let directory = ctx.config.franchisee_directory();
    let query = ctx.referral_query();
    let session = FranchiseeSession::resolve(&directory, &store, query.as_deref());
    let active = session.code().map(|c| c.as_str());

    let listings: Vec<Listing<'_>> = directory
        .iter()
        .map(|(code, f)| Listing {
            code: code.as_str(),
            name: &f.name,
            phone: &f.phone,
            location: &f.location,
            active: active == Some(code.as_str()),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&listings);
        return Ok(());
    }

    ctx.output.header("Franchisees");
    let mut table = Table::new(&[("CODE", 8), ("NAME", 16), ("PHONE", 14), ("LOCATION", 12)]);
    for listing in &listings {
        let code = if listing.active {
            format!("{}*", listing.code)
        } else {
            listing.code.to_string()
        };
        table.row(&[code.as_str(), listing.name, listing.phone, listing.location]);
    }
    ctx.output.table(&table);

    match session.current() {
        Some(f) => ctx.output.info(&format!("Orders currently go through {} (*)", f.name)),
        None => ctx.output.info(&format!(
            "Orders currently go to the main line {}",
            ctx.config.store.main_whatsapp
        )),
    }

    Ok(())
}
