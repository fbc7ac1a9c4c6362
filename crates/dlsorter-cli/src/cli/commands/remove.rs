//! `dlsorter remove <id>` – delete a rule.

use anyhow::Result;
use dlsorter_core::rules::RuleStore;

use super::resolve_rule_id;

pub async fn run_remove(store: &RuleStore, id: &str) -> Result<()> {
    let id = resolve_rule_id(store, id).await?;
    let removed = store.delete(&id).await?;
    println!("Removed rule {} ({})", id, removed.dir);
    Ok(())
}
