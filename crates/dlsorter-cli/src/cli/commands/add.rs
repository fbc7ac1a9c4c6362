//! `dlsorter add <dir>` – add a new rule.

use anyhow::Result;
use dlsorter_core::rules::{Rule, RuleStore};

pub async fn run_add(
    store: &RuleStore,
    dir: &str,
    pattern: &str,
    file_pattern: &str,
    disabled: bool,
    at: Option<usize>,
) -> Result<()> {
    let mut rule = Rule::new(pattern, file_pattern, dir);
    rule.enabled = !disabled;
    let id = rule.id.clone();

    match at {
        Some(index) => store.insert_at(index, rule).await?,
        None => store.insert(rule).await?,
    }
    println!("Added rule {id}");
    Ok(())
}
