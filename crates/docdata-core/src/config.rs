use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A display category assigned to a collection: a human label plus a
/// numeric ordering weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub weight: i64,
}

/// The category table: named groups plus a closed mapping from exact
/// collection name to group key. Supplied as configuration so the builder is
/// not tied to one category scheme.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupingConfig {
    pub groups: IndexMap<String, Group>,
    pub collections: IndexMap<String, String>,
}

impl GroupingConfig {
    /// Look up the group for a collection name. A `None` here is fatal to
    /// the build; missing entries are never defaulted.
    pub fn lookup(&self, collection: &str) -> Option<&Group> {
        self.collections
            .get(collection)
            .and_then(|key| self.groups.get(key))
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        let mut groups = IndexMap::new();
        groups.insert("orch".to_string(), group("Orchestration", 0));
        groups.insert("mgmt".to_string(), group("Management", 1));
        groups.insert("mon".to_string(), group("Monitoring", 2));
        groups.insert("util".to_string(), group("Utility", 3));

        let mut collections = IndexMap::new();
        for (name, key) in [
            ("Commands", "orch"),
            ("Definitions", "orch"),
            ("Deployments", "orch"),
            ("Instances", "orch"),
            ("Components", "mon"),
            ("Metrics", "mon"),
            ("Events", "mon"),
            ("Images", "mgmt"),
            ("Resource Modules", "mgmt"),
            ("Resource Pools", "mgmt"),
            ("Snapshots", "mgmt"),
            ("Stores", "mgmt"),
            ("Versions", "util"),
        ] {
            collections.insert(name.to_string(), key.to_string());
        }

        Self {
            groups,
            collections,
        }
    }
}

fn group(name: &str, weight: i64) -> Group {
    Group {
        name: name.to_string(),
        weight,
    }
}

/// Load a grouping table from a YAML file. Returns `None` if the file
/// doesn't exist.
pub fn load_grouping(path: &Path) -> Result<Option<GroupingConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read grouping table {}: {}", path.display(), e))?;
    let config: GroupingConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse grouping table {}: {}", path.display(), e))?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let config = GroupingConfig::default();
        assert_eq!(config.groups.len(), 4);
        assert_eq!(config.collections.len(), 13);

        let deployments = config.lookup("Deployments").unwrap();
        assert_eq!(deployments.name, "Orchestration");
        assert_eq!(deployments.weight, 0);

        let pools = config.lookup("Resource Pools").unwrap();
        assert_eq!(pools.name, "Management");
        assert_eq!(pools.weight, 1);

        assert!(config.lookup("Unmapped").is_none());
    }

    #[test]
    fn test_parse_grouping_yaml() {
        let yaml = r#"
groups:
  core:
    name: Core
    weight: 0
  extras:
    name: Extras
    weight: 5
collections:
  Jobs: core
  Reports: extras
"#;
        let config: GroupingConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.lookup("Jobs").unwrap().weight, 0);
        assert_eq!(config.lookup("Reports").unwrap().name, "Extras");
    }

    #[test]
    fn test_lookup_with_missing_group_key() {
        let yaml = r#"
groups: {}
collections:
  Jobs: core
"#;
        let config: GroupingConfig = serde_yaml_ng::from_str(yaml).unwrap();
        // A collection mapped to an undefined group key is still unmapped.
        assert!(config.lookup("Jobs").is_none());
    }
}
