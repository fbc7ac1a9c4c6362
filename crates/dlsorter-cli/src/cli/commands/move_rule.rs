//! `dlsorter move <id> <index>` – reorder the rule list.

use anyhow::Result;
use dlsorter_core::rules::RuleStore;

use super::resolve_rule_id;

pub async fn run_move(store: &RuleStore, id: &str, index: usize) -> Result<()> {
    let id = resolve_rule_id(store, id).await?;
    store.reorder(&id, index).await?;
    println!("Moved rule {id} to position {index}");
    Ok(())
}
