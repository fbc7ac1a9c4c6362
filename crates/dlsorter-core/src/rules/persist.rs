//! Rules file I/O: one JSON document holding the ordered rule list.
//!
//! An absent file is treated as an empty rule set and written back on first
//! load, so later readers and the options surface see an initialized key.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Rule;

/// Default location: `~/.local/state/dlsorter/rules.json`.
pub fn default_rules_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dlsorter")?;
    Ok(xdg_dirs.place_state_file("rules.json")?)
}

/// Load the rule list, initializing the file to an empty list if absent.
pub fn load_or_init(path: &Path) -> Result<Vec<Rule>> {
    if !path.exists() {
        save(path, &[])?;
        tracing::info!("initialized empty rule set at {}", path.display());
        return Ok(Vec::new());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file: {}", path.display()))?;
    let rules: Vec<Rule> = serde_json::from_str(&data)
        .with_context(|| format!("malformed rules file: {}", path.display()))?;
    Ok(rules)
}

/// Write the whole rule list back.
pub fn save(path: &Path, rules: &[Rule]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create rules dir: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(rules)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write rules file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_initializes_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let rules = load_or_init(&path).unwrap();
        assert!(rules.is_empty());
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let rules = vec![
            Rule::new("first", "", "/a/"),
            Rule::new("second", "", "/b/"),
            Rule::new("", "\\.iso$", "/c/"),
        ];
        save(&path, &rules).unwrap();
        let loaded = load_or_init(&path).unwrap();
        assert_eq!(loaded, rules);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_or_init(&path).is_err());
    }

    #[test]
    fn reads_extension_shaped_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"[{"id":"k1","pattern":"x/","filePattern":"\\.zip$","dir":"/dl/","enabled":false}]"#,
        )
        .unwrap();
        let rules = load_or_init(&path).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "k1");
        assert_eq!(rules[0].file_pattern, "\\.zip$");
        assert!(!rules[0].enabled);
    }
}
