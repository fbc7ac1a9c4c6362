//! `dlsorter list` – show all rules in evaluation order.

use anyhow::Result;
use dlsorter_core::rules::RuleStore;

pub async fn run_list(store: &RuleStore) -> Result<()> {
    let rules = store.snapshot().await;
    if rules.is_empty() {
        println!("No rules configured.");
        return Ok(());
    }

    println!(
        "{:<4} {:<10} {:<3} {:<30} {:<20} DIR",
        "POS", "ID", "ON", "PATTERN", "FILE PATTERN"
    );
    for (index, rule) in rules.iter().enumerate() {
        let short_id: String = rule.id.chars().take(8).collect();
        println!(
            "{:<4} {:<10} {:<3} {:<30} {:<20} {}",
            index,
            short_id,
            if rule.enabled { "on" } else { "off" },
            rule.pattern,
            rule.file_pattern,
            rule.dir
        );
    }
    Ok(())
}
