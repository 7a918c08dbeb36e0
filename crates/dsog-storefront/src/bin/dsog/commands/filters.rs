//! Category filters for a collection.

use anyhow::Result;

use super::FiltersArgs;
use crate::context::Context;
use crate::output::Table;

/// Run the filters command.
pub async fn run(args: FiltersArgs, ctx: &Context) -> Result<()> {
    let filters = ctx.config.filters_for(&args.collection);

    if ctx.output.is_json() {
        ctx.output.json(&filters);
        return Ok(());
    }

    ctx.output.header(&format!("Filters for {}", args.collection));
    if filters.is_empty() {
        ctx.output.info("No filters configured for this collection.");
        return Ok(());
    }

    let mut table = Table::new(&[("ID", 12), ("LABEL", 20)]);
    for filter in filters {
        table.row(&[filter.id.as_str(), filter.name.as_str()]);
    }
    ctx.output.table(&table);

    Ok(())
}
