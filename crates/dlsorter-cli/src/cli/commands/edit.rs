//! `dlsorter edit <id>` – change a rule's patterns or destination.

use anyhow::Result;
use dlsorter_core::rules::{RuleStore, RuleUpdate};

use super::resolve_rule_id;

pub async fn run_edit(
    store: &RuleStore,
    id: &str,
    pattern: Option<String>,
    file_pattern: Option<String>,
    dir: Option<String>,
) -> Result<()> {
    if pattern.is_none() && file_pattern.is_none() && dir.is_none() {
        println!("Nothing to change; pass --pattern, --file-pattern or --dir.");
        return Ok(());
    }
    let id = resolve_rule_id(store, id).await?;
    store
        .update(
            &id,
            RuleUpdate {
                pattern,
                file_pattern,
                dir,
            },
        )
        .await?;
    println!("Updated rule {id}");
    Ok(())
}
