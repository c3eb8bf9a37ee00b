//! Search command handler

use anyhow::{Context, Result, bail};
use gopher_client::GopherClient;

use crate::config::Config;
use crate::output::{print_items, print_json};

/// Run the inbound `search` operation and print its output
///
/// With `--json` the output object is printed as-is, error included, and the
/// command succeeds; otherwise a failed search exits non-zero.
pub async fn run_search(query: &str, json: bool, config: &Config) -> Result<()> {
    let client =
        GopherClient::new(config.client.clone()).context("Failed to create search client")?;
    let cancel = config.cancellation();

    let output = client.search_with_cancel(query, &cancel).await;

    if json {
        return print_json(&output);
    }

    if let Some(error) = output.error {
        bail!("Search failed: {}", error);
    }

    print_items(&output.items);
    Ok(())
}
