//! Terminal output helpers

use anyhow::Result;
use colored::*;
use gopher_client::{ResultItem, SearchOutput};

/// Print a search output as pretty JSON on stdout
pub fn print_json(output: &SearchOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

/// Print result items for a human reader
pub fn print_items(items: &[ResultItem]) {
    if items.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    println!("{}", format!("Found {} result(s):", items.len()).bold());
    println!();
    for item in items {
        print_item(item);
    }
}

fn print_item(item: &ResultItem) {
    println!("  {} {}", "▸".cyan(), item.id.dimmed());
    println!("    Score:    {}", format!("{:.3}", item.score).green());
    for line in item.content.lines() {
        println!("    {}", line);
    }
    if !item.metadata.is_null() {
        println!("    Metadata: {}", item.metadata.to_string().dimmed());
    }
    println!();
}
