//! Process-wide rule cache with persistence and change notification.
//!
//! All mutation funnels through one write path: take the lock, edit the list,
//! persist, bump the generation counter. The options surface (CLI or UI) calls
//! the CRUD methods; an embedding host that receives external change events
//! pushes the new list through [`RuleStore::refresh`]. Readers take cheap
//! snapshots and may observe a list that is one update behind, which the
//! engine accepts.

use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;
use tokio::sync::{watch, RwLock};

use super::{persist, Rule};

#[derive(Debug, Error)]
pub enum RuleStoreError {
    #[error("no rule with id {0}")]
    UnknownRule(String),
    #[error("index {index} out of bounds for {len} rules")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

/// Partial update for [`RuleStore::update`]; `None` fields keep their value.
#[derive(Debug, Default, Clone)]
pub struct RuleUpdate {
    pub pattern: Option<String>,
    pub file_pattern: Option<String>,
    pub dir: Option<String>,
}

pub struct RuleStore {
    rules: RwLock<Vec<Rule>>,
    path: PathBuf,
    generation: watch::Sender<u64>,
}

impl RuleStore {
    /// Open the store at `path`, initializing an empty rules file if absent.
    pub fn open(path: PathBuf) -> Result<Self> {
        let rules = persist::load_or_init(&path)?;
        tracing::debug!(count = rules.len(), "rules loaded from {}", path.display());
        let (generation, _) = watch::channel(0);
        Ok(Self {
            rules: RwLock::new(rules),
            path,
            generation,
        })
    }

    /// Open the store at the default XDG state path.
    pub fn open_default() -> Result<Self> {
        Self::open(persist::default_rules_path()?)
    }

    /// Current rule list, in order.
    pub async fn snapshot(&self) -> Vec<Rule> {
        self.rules.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }

    /// Change notifications: the value increments on every update.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    /// Replace the cache with an externally observed list (change push from
    /// the backing store). Does not write back.
    pub async fn refresh(&self, rules: Vec<Rule>) {
        tracing::debug!(count = rules.len(), "rule cache refreshed");
        *self.rules.write().await = rules;
        self.generation.send_modify(|g| *g += 1);
    }

    /// Append a rule at the end of the list.
    pub async fn insert(&self, rule: Rule) -> Result<(), RuleStoreError> {
        let mut rules = self.rules.write().await;
        rules.push(rule);
        self.commit(&rules)
    }

    /// Insert a rule at `index` (0-based; `index == len` appends).
    pub async fn insert_at(&self, index: usize, rule: Rule) -> Result<(), RuleStoreError> {
        let mut rules = self.rules.write().await;
        if index > rules.len() {
            return Err(RuleStoreError::IndexOutOfBounds {
                index,
                len: rules.len(),
            });
        }
        rules.insert(index, rule);
        self.commit(&rules)
    }

    /// Apply a partial edit to the rule with `id`.
    pub async fn update(&self, id: &str, update: RuleUpdate) -> Result<(), RuleStoreError> {
        let mut rules = self.rules.write().await;
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RuleStoreError::UnknownRule(id.to_string()))?;
        if let Some(pattern) = update.pattern {
            rule.pattern = pattern;
        }
        if let Some(file_pattern) = update.file_pattern {
            rule.file_pattern = file_pattern;
        }
        if let Some(dir) = update.dir {
            rule.dir = dir;
        }
        self.commit(&rules)
    }

    /// Remove the rule with `id`, returning it.
    pub async fn delete(&self, id: &str) -> Result<Rule, RuleStoreError> {
        let mut rules = self.rules.write().await;
        let index = Self::position(&rules, id)?;
        let removed = rules.remove(index);
        self.commit(&rules)?;
        Ok(removed)
    }

    /// Flip `enabled` on the rule with `id`; returns the new state.
    pub async fn toggle(&self, id: &str) -> Result<bool, RuleStoreError> {
        let mut rules = self.rules.write().await;
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RuleStoreError::UnknownRule(id.to_string()))?;
        rule.enabled = !rule.enabled;
        let enabled = rule.enabled;
        self.commit(&rules)?;
        Ok(enabled)
    }

    /// Move the rule with `id` to `new_index` (0-based, clamped to the end).
    pub async fn reorder(&self, id: &str, new_index: usize) -> Result<(), RuleStoreError> {
        let mut rules = self.rules.write().await;
        let from = Self::position(&rules, id)?;
        let rule = rules.remove(from);
        let to = new_index.min(rules.len());
        rules.insert(to, rule);
        self.commit(&rules)
    }

    fn position(rules: &[Rule], id: &str) -> Result<usize, RuleStoreError> {
        rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RuleStoreError::UnknownRule(id.to_string()))
    }

    /// Persist the current list and publish the change. Called with the write
    /// lock held so observers never see an unpersisted list.
    fn commit(&self, rules: &[Rule]) -> Result<(), RuleStoreError> {
        persist::save(&self.path, rules)?;
        self.generation.send_modify(|g| *g += 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store(dir: &tempfile::TempDir) -> RuleStore {
        RuleStore::open(dir.path().join("rules.json")).unwrap()
    }

    #[tokio::test]
    async fn insert_and_snapshot_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store.insert(Rule::new("a", "", "/a/")).await.unwrap();
        store.insert(Rule::new("b", "", "/b/")).await.unwrap();
        let rules = store.snapshot().await;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].pattern, "a");
        assert_eq!(rules[1].pattern, "b");
    }

    #[tokio::test]
    async fn insert_at_and_reorder() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store.insert(Rule::new("a", "", "/a/")).await.unwrap();
        store.insert(Rule::new("c", "", "/c/")).await.unwrap();
        store.insert_at(1, Rule::new("b", "", "/b/")).await.unwrap();
        let rules = store.snapshot().await;
        assert_eq!(
            rules.iter().map(|r| r.pattern.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );

        let id_c = rules[2].id.clone();
        store.reorder(&id_c, 0).await.unwrap();
        let rules = store.snapshot().await;
        assert_eq!(
            rules.iter().map(|r| r.pattern.as_str()).collect::<Vec<_>>(),
            ["c", "a", "b"]
        );
    }

    #[tokio::test]
    async fn insert_at_rejects_past_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let err = store.insert_at(3, Rule::new("a", "", "/a/")).await.unwrap_err();
        assert!(matches!(
            err,
            RuleStoreError::IndexOutOfBounds { index: 3, len: 0 }
        ));
    }

    #[tokio::test]
    async fn update_toggle_delete_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store.insert(Rule::new("a", "", "/a/")).await.unwrap();
        let id = store.snapshot().await[0].id.clone();

        store
            .update(
                &id,
                RuleUpdate {
                    dir: Some("/moved/".to_string()),
                    ..RuleUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.snapshot().await[0].dir, "/moved/");
        assert_eq!(store.snapshot().await[0].pattern, "a");

        assert!(!store.toggle(&id).await.unwrap());
        assert!(store.toggle(&id).await.unwrap());

        let removed = store.delete(&id).await.unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let err = store.toggle("missing").await.unwrap_err();
        assert!(matches!(err, RuleStoreError::UnknownRule(_)));
    }

    #[tokio::test]
    async fn mutations_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        {
            let store = RuleStore::open(path.clone()).unwrap();
            store.insert(Rule::new("a", "", "/a/")).await.unwrap();
        }
        let store = RuleStore::open(path).unwrap();
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn refresh_updates_cache_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let mut rx = store.subscribe();
        let before = *rx.borrow_and_update();

        store.refresh(vec![Rule::new("pushed", "", "/p/")]).await;
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update() > before);
        assert_eq!(store.snapshot().await[0].pattern, "pushed");
    }
}
