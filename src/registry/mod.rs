//! Item registry: alias and function CRUD on the active profile

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::error::{ProfilerError, Result};
use crate::model::{normalize_name, Item, ItemKind};
use crate::store::LocalStore;

lazy_static! {
    // Characters bash accepts in alias and function names without quoting
    static ref ITEM_NAME: Regex = Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.:@%+-]*$").unwrap();
}

/// User supplied fields for a new or updated item
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: String,
    pub desc: String,
    pub body: String,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, desc: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Result of a delete: what went away and how many selections were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub removed: Vec<Item>,
    pub skipped: usize,
}

/// Sort items the way selection prompts show them: by name length, ties in stored order
pub fn length_sorted(items: &[Item]) -> Vec<Item> {
    let mut view = items.to_vec();
    view.sort_by_key(|item| item.name.chars().count());
    view
}

pub struct ItemRegistry<'a> {
    store: &'a LocalStore,
}

impl<'a> ItemRegistry<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// Items of `kind` in display order
    pub fn list(&self, kind: ItemKind) -> Result<Vec<Item>> {
        self.store.require_integrity()?;
        let profile = self.store.profile()?;
        Ok(length_sorted(profile.items(kind)))
    }

    /// Insert a new item, or replace the command of the item with the same name.
    ///
    /// Names match after trimming and lowercasing. An update keeps the
    /// existing `id` and `desc`.
    pub fn upsert(&self, kind: ItemKind, draft: ItemDraft) -> Result<UpsertOutcome> {
        let name = draft.name.trim();
        validate_name(kind, name)?;
        let body = draft.body.trim();
        if body.is_empty() {
            return Err(ProfilerError::validation(format!(
                "{} body must not be empty",
                kind.singular()
            )));
        }

        self.store.require_integrity()?;
        let mut profile = self.store.profile()?;
        let key = normalize_name(name);

        let items = profile.items_mut(kind);
        let outcome = match items.iter_mut().find(|item| normalize_name(&item.name) == key) {
            Some(existing) => {
                // Stored name wins so the listed name is the one the shell defines
                existing.command = kind.render(&existing.name, body);
                UpsertOutcome::Updated
            }
            None => {
                items.push(Item {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    desc: draft.desc.trim().to_string(),
                    command: kind.render(name, body),
                });
                UpsertOutcome::Inserted
            }
        };

        self.store.set_profile(&profile)?;
        log::debug!("{} {} '{}': {:?}", kind, profile.name, name, outcome);
        Ok(outcome)
    }

    /// Delete by index into the length-sorted view.
    ///
    /// `selector` is one index or a comma separated list. A single bad index
    /// is a validation error. In a list, bad and unparsable indices are
    /// skipped and counted while the valid ones are applied; repeats are
    /// applied once.
    pub fn delete(&self, kind: ItemKind, selector: &str) -> Result<DeleteReport> {
        self.store.require_integrity()?;
        let mut profile = self.store.profile()?;
        let view = length_sorted(profile.items(kind));
        if view.is_empty() {
            return Err(ProfilerError::validation(format!(
                "No {} available.",
                kind.plural()
            )));
        }

        let parts: Vec<&str> = selector.split(',').map(str::trim).collect();
        let mut selected: Vec<&Item> = Vec::new();
        let mut skipped = 0;

        if parts.len() == 1 {
            let item = parts[0]
                .parse::<usize>()
                .ok()
                .and_then(|i| view.get(i))
                .ok_or_else(|| {
                    ProfilerError::validation(
                        "You must provide a valid number or a comma separated list of numbers",
                    )
                })?;
            selected.push(item);
        } else {
            for part in parts {
                match part.parse::<usize>().ok().and_then(|i| view.get(i)) {
                    Some(item) => {
                        if !selected.iter().any(|s| s.id == item.id) {
                            selected.push(item);
                        }
                    }
                    None => skipped += 1,
                }
            }
        }

        let removed: Vec<Item> = selected.into_iter().cloned().collect();
        profile
            .items_mut(kind)
            .retain(|item| !removed.iter().any(|r| r.id == item.id));

        if !removed.is_empty() {
            self.store.set_profile(&profile)?;
        }
        log::debug!(
            "deleted {} {}, skipped {}",
            removed.len(),
            kind.plural(),
            skipped
        );
        Ok(DeleteReport { removed, skipped })
    }
}

fn validate_name(kind: ItemKind, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ProfilerError::validation(format!(
            "{} name must not be empty",
            kind.singular()
        )));
    }
    if !ITEM_NAME.is_match(name) {
        return Err(ProfilerError::validation(format!(
            "'{}' is not a valid {} name",
            name,
            kind.singular()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, LocalStore) {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("data"));
        store.initialize().unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_insert_renders_command() {
        let (_guard, store) = setup();
        let registry = ItemRegistry::new(&store);

        let outcome = registry
            .upsert(ItemKind::Alias, ItemDraft::new("ll", "long list", "ls -la"))
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let items = registry.list(ItemKind::Alias).unwrap();
        assert_eq!(items[0].command, "alias ll=\"ls -la\"");
        assert_eq!(items[0].desc, "long list");
        assert!(Uuid::parse_str(&items[0].id).is_ok());
    }

    #[test]
    fn test_update_keeps_id_and_desc() {
        let (_guard, store) = setup();
        let registry = ItemRegistry::new(&store);
        registry
            .upsert(ItemKind::Function, ItemDraft::new("mkcd", "make and enter", "mkdir $1"))
            .unwrap();
        let before = registry.list(ItemKind::Function).unwrap();

        let outcome = registry
            .upsert(
                ItemKind::Function,
                ItemDraft::new(" MKCD ", "ignored", "mkdir -p $1 && cd $1"),
            )
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);

        let after = registry.list(ItemKind::Function).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[0].desc, "make and enter");
        assert_eq!(after[0].name, "mkcd");
        assert_eq!(after[0].command, "function mkcd(){\n\tmkdir -p $1 && cd $1\n}");
    }

    #[test]
    fn test_alias_and_function_lists_are_separate() {
        let (_guard, store) = setup();
        let registry = ItemRegistry::new(&store);
        registry
            .upsert(ItemKind::Alias, ItemDraft::new("gs", "", "git status"))
            .unwrap();
        let outcome = registry
            .upsert(ItemKind::Function, ItemDraft::new("gs", "", "git status -sb"))
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);
    }

    #[test]
    fn test_invalid_drafts_are_rejected() {
        let (_guard, store) = setup();
        let registry = ItemRegistry::new(&store);

        for draft in [
            ItemDraft::new("", "", "ls"),
            ItemDraft::new("ll", "", "   "),
            ItemDraft::new("bad name", "", "ls"),
            ItemDraft::new("x=y", "", "ls"),
        ] {
            assert!(registry.upsert(ItemKind::Alias, draft).unwrap_err().is_validation());
        }
        assert!(registry.list(ItemKind::Alias).unwrap().is_empty());
    }

    #[test]
    fn test_single_invalid_index_is_an_error() {
        let (_guard, store) = setup();
        let registry = ItemRegistry::new(&store);
        registry
            .upsert(ItemKind::Alias, ItemDraft::new("ll", "", "ls -la"))
            .unwrap();

        assert!(registry.delete(ItemKind::Alias, "3").unwrap_err().is_validation());
        assert!(registry.delete(ItemKind::Alias, "x").unwrap_err().is_validation());
        assert_eq!(registry.list(ItemKind::Alias).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_on_empty_list() {
        let (_guard, store) = setup();
        let registry = ItemRegistry::new(&store);
        let err = registry.delete(ItemKind::Function, "0").unwrap_err();
        assert_eq!(err.to_string(), "No functions available.");
    }

    #[test]
    fn test_repeated_index_is_applied_once() {
        let (_guard, store) = setup();
        let registry = ItemRegistry::new(&store);
        registry
            .upsert(ItemKind::Alias, ItemDraft::new("ll", "", "ls -la"))
            .unwrap();
        registry
            .upsert(ItemKind::Alias, ItemDraft::new("gst", "", "git status"))
            .unwrap();

        let report = registry.delete(ItemKind::Alias, "0, 0").unwrap();
        assert_eq!(report.removed.len(), 1);
        assert_eq!(report.removed[0].name, "ll");
        assert_eq!(report.skipped, 0);
        assert_eq!(registry.list(ItemKind::Alias).unwrap().len(), 1);
    }

    #[test]
    fn test_length_sorted_is_stable() {
        let item = |id: &str, name: &str| Item {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            command: String::new(),
        };
        let view = length_sorted(&[item("1", "zz"), item("2", "a"), item("3", "bb")]);
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }
}
