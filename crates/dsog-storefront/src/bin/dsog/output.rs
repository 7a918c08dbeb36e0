//! Terminal output for the `dsog` binary.
//!
//! In `--json` mode only the documents passed to [`Output::json`] reach
//! stdout, and errors go to stderr as `{"error": ...}`. Everything else is
//! human output and is suppressed.

use console::{style, StyledObject};
use dsog_storefront::CatalogSource;
use dsog_ui::Rendered;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn status(&self, marker: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", marker, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.status(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(style("✓").green(), msg);
    }

    /// Warnings go to stderr so piped tables stay clean.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Pretty JSON document on stdout, in either mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Unstyled text on stdout, in either mode.
    pub fn raw(&self, text: &str) {
        println!("{}", text);
    }

    pub fn table(&self, table: &Table) {
        if self.json {
            return;
        }
        let mut lines = table.lines();
        if let Some(head) = lines.next() {
            println!("  {}", style(head).dim());
        }
        for line in lines {
            println!("  {}", line);
        }
    }

    /// A product list state: cards as a table, anything else as a message.
    pub fn rendered(&self, rendered: &Rendered) {
        match rendered {
            Rendered::Cards { cards } => {
                let mut table =
                    Table::new(&[("ID", 6), ("NAME", 32), ("PRICE", 12), ("BADGE", 10)]);
                for card in cards {
                    table.row(&[
                        card.product_id.as_str(),
                        card.title.as_str(),
                        card.price_label.as_str(),
                        card.badge.as_str(),
                    ]);
                }
                self.table(&table);
            }
            Rendered::Empty { message, action } => {
                self.warn(message);
                self.kv(&action.label, &action.link);
            }
            Rendered::Failed { message, .. } => self.warn(message),
            Rendered::Loading { .. } => self.info("Loading..."),
        }
    }

    /// Spinner on stderr while a catalog call is outstanding. Hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Fixed-width text table. Cells wider than their column are kept whole.
pub struct Table {
    columns: Vec<(&'static str, usize)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells print as `-`.
    pub fn row(&mut self, cells: &[&str]) -> &mut Self {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Header line followed by one line per row, without trailing padding.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let head: Vec<&str> = self.columns.iter().map(|(name, _)| *name).collect();
        std::iter::once(self.line(&head)).chain(self.rows.iter().map(move |row| {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.line(&cells)
        }))
    }

    fn line(&self, cells: &[&str]) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (_, width))| {
                let cell = cells.get(i).copied().unwrap_or("-");
                format!("{:width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

/// Coloured label for where data came from.
pub fn source_badge(source: CatalogSource) -> String {
    match source {
        CatalogSource::Network => style(source.as_str()).green().to_string(),
        CatalogSource::Cache | CatalogSource::Shared => style(source.as_str()).cyan().to_string(),
        CatalogSource::Fallback => style(source.as_str()).yellow().to_string(),
    }
}
