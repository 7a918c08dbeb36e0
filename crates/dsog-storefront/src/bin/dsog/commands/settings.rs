//! Store settings.

use anyhow::{Context as _, Result};

use super::SettingsArgs;
use crate::context::Context;

/// Run the settings command.
pub async fn run(_args: SettingsArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    let spinner = ctx.output.spinner("Fetching settings...");
    let settings = storefront.settings().await;
    spinner.finish_and_clear();
    let settings = settings.context("Failed to fetch settings")?;

    if ctx.output.is_json() {
        ctx.output.json(&settings);
        return Ok(());
    }

    ctx.output.header("Store settings");
    if settings.is_empty() {
        ctx.output.info("No settings returned.");
    }
    for (key, value) in &settings {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        ctx.output.kv(key, &value);
    }

    Ok(())
}
