//! Rule model, persistence, and the process-wide rule store.

mod model;
pub mod persist;
mod store;

pub use model::Rule;
pub use store::{RuleStore, RuleStoreError, RuleUpdate};
