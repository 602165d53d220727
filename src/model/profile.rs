//! Profile document and the aliases/functions it owns

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{ProfilerError, Result};

/// Item kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Alias,
    Function,
}

impl ItemKind {
    /// Render the shell snippet stored in `Item::command`
    ///
    /// - Alias: `alias NAME="BODY"`
    /// - Function: `function NAME(){\n\tBODY\n}`
    pub fn render(self, name: &str, body: &str) -> String {
        match self {
            ItemKind::Alias => format!("alias {}=\"{}\"", name, body),
            ItemKind::Function => format!("function {}(){{\n\t{}\n}}", name, body),
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ItemKind::Alias => "alias",
            ItemKind::Function => "function",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            ItemKind::Alias => "aliases",
            ItemKind::Function => "functions",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Alias => write!(f, "alias"),
            ItemKind::Function => write!(f, "func"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alias" | "a" => Ok(ItemKind::Alias),
            "func" | "function" | "f" => Ok(ItemKind::Function),
            _ => Err(format!("Unknown item kind: {}", s)),
        }
    }
}

/// Name used for uniqueness checks: trimmed and lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single alias or function
///
/// `id` is generated once at insertion and survives every later update.
/// `command` is the fully rendered snippet, see [`ItemKind::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub command: String,
}

/// The locally materialized view of one remote profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_bashrc_file_path: Option<String>,
    #[serde(default)]
    pub aliases: Vec<Item>,
    #[serde(default)]
    pub functions: Vec<Item>,
}

impl ProfileDocument {
    /// Parse and validate a serialized profile
    ///
    /// Rejects malformed JSON and lists holding two items whose names
    /// collide after [`normalize_name`].
    pub fn from_json(content: &str) -> Result<Self> {
        let doc: ProfileDocument = serde_json::from_str(content)
            .map_err(|e| ProfilerError::InvalidDocument(e.to_string()))?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check the per-list name uniqueness invariant
    pub fn validate(&self) -> Result<()> {
        for kind in [ItemKind::Alias, ItemKind::Function] {
            let mut seen = HashSet::new();
            for item in self.items(kind) {
                if !seen.insert(normalize_name(&item.name)) {
                    return Err(ProfilerError::InvalidDocument(format!(
                        "duplicate {} '{}'",
                        kind.singular(),
                        item.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn items(&self, kind: ItemKind) -> &[Item] {
        match kind {
            ItemKind::Alias => &self.aliases,
            ItemKind::Function => &self.functions,
        }
    }

    pub fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Alias => &mut self.aliases,
            ItemKind::Function => &mut self.functions,
        }
    }

    /// Drop all items and take a new name, keeping the bashrc path
    pub fn reset_as(&mut self, name: &str) {
        self.name = name.to_string();
        self.aliases.clear();
        self.functions.clear();
    }

    /// Render every command as a sourceable script
    pub fn render_script(&self) -> String {
        let mut out = String::new();
        out.push_str("# Generated by shprof. Edits here are overwritten.\n");
        if !self.name.is_empty() {
            out.push_str(&format!("# Profile: {}\n", self.name));
        }
        for kind in [ItemKind::Alias, ItemKind::Function] {
            let items = self.items(kind);
            if items.is_empty() {
                continue;
            }
            out.push('\n');
            for item in items {
                if !item.desc.trim().is_empty() {
                    out.push_str(&format!("# {}\n", item.desc.trim()));
                }
                out.push_str(&item.command);
                out.push('\n');
            }
        }
        out
    }
}

/// Last raw payload received from (or sent to) the remote directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfileCache {
    #[serde(default)]
    pub gist_id: Option<String>,
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> Item {
        Item {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            command: ItemKind::Alias.render(name, "ls -la"),
        }
    }

    #[test]
    fn test_render_alias() {
        assert_eq!(ItemKind::Alias.render("ll", "ls -la"), "alias ll=\"ls -la\"");
    }

    #[test]
    fn test_render_function() {
        assert_eq!(
            ItemKind::Function.render("mkcd", "mkdir -p $1 && cd $1"),
            "function mkcd(){\n\tmkdir -p $1 && cd $1\n}"
        );
    }

    #[test]
    fn test_item_kind_from_str() {
        assert_eq!("a".parse::<ItemKind>().unwrap(), ItemKind::Alias);
        assert_eq!("function".parse::<ItemKind>().unwrap(), ItemKind::Function);
        assert!("export".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  GitS "), "gits");
    }

    #[test]
    fn test_from_json_camel_case() {
        let doc = ProfileDocument::from_json(
            r#"{"name":"Work","userBashrcFilePath":"/home/u/.bashrc","aliases":[{"id":"1","name":"ll","desc":"list","command":"alias ll=\"ls -la\""}],"functions":[]}"#,
        )
        .unwrap();
        assert_eq!(doc.name, "Work");
        assert_eq!(doc.user_bashrc_file_path.as_deref(), Some("/home/u/.bashrc"));
        assert_eq!(doc.aliases.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let mut doc = ProfileDocument::default();
        doc.aliases.push(item("1", "ll"));
        doc.aliases.push(item("2", " LL"));
        let json = serde_json::to_string(&doc).unwrap();

        let err = ProfileDocument::from_json(&json).unwrap_err();
        assert!(matches!(err, ProfilerError::InvalidDocument(_)));
    }

    #[test]
    fn test_same_name_across_kinds_is_allowed() {
        let mut doc = ProfileDocument::default();
        doc.aliases.push(item("1", "build"));
        doc.functions.push(item("2", "build"));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ProfileDocument::from_json("[1, 2]").is_err());
        assert!(ProfileDocument::from_json("").is_err());
    }

    #[test]
    fn test_reset_as_keeps_bashrc_path() {
        let mut doc = ProfileDocument {
            name: "Home".into(),
            user_bashrc_file_path: Some("/home/u/.bashrc".into()),
            aliases: vec![item("1", "ll")],
            functions: vec![item("2", "mkcd")],
        };
        doc.reset_as("Work");
        assert_eq!(doc.name, "Work");
        assert!(doc.aliases.is_empty());
        assert!(doc.functions.is_empty());
        assert_eq!(doc.user_bashrc_file_path.as_deref(), Some("/home/u/.bashrc"));
    }

    #[test]
    fn test_render_script() {
        let mut doc = ProfileDocument {
            name: "Home".into(),
            ..Default::default()
        };
        let mut ll = item("1", "ll");
        ll.desc = "long listing".into();
        doc.aliases.push(ll);

        let script = doc.render_script();
        assert!(script.contains("# Profile: Home"));
        assert!(script.contains("# long listing\nalias ll=\"ls -la\"\n"));
    }
}
