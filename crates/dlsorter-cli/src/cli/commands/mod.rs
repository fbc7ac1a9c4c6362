//! One module per subcommand, plus shared helpers.

mod add;
mod completions;
mod edit;
mod list;
mod move_rule;
mod remove;
mod toggle;
mod watch;

pub use add::run_add;
pub use completions::run_completions;
pub use edit::run_edit;
pub use list::run_list;
pub use move_rule::run_move;
pub use remove::run_remove;
pub use test::run_test;
pub use toggle::run_toggle;
pub use watch::run_watch;

use anyhow::{bail, Result};
use dlsorter_core::rules::RuleStore;

/// Resolves a user-supplied rule id: exact match first, then a unique prefix
/// (ids are UUIDs, so a few leading characters are usually enough).
pub(crate) async fn resolve_rule_id(store: &RuleStore, given: &str) -> Result<String> {
    let rules = store.snapshot().await;
    if rules.iter().any(|r| r.id == given) {
        return Ok(given.to_string());
    }
    let matches: Vec<&str> = rules
        .iter()
        .filter(|r| r.id.starts_with(given))
        .map(|r| r.id.as_str())
        .collect();
    match matches.as_slice() {
        [] => bail!("no rule with id {given}"),
        [id] => Ok(id.to_string()),
        _ => bail!("rule id prefix {given} is ambiguous ({} matches)", matches.len()),
    }
}
