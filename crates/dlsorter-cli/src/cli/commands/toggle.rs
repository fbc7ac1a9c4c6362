//! `dlsorter toggle <id>` – flip a rule's enabled flag.

use anyhow::Result;
use dlsorter_core::rules::RuleStore;

use super::resolve_rule_id;

pub async fn run_toggle(store: &RuleStore, id: &str) -> Result<()> {
    let id = resolve_rule_id(store, id).await?;
    let enabled = store.toggle(&id).await?;
    println!(
        "Rule {id} is now {}",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}
