//! In-memory todo store.
//!
//! Records are keyed by the identifier derived from their description and
//! kept in insertion order. Identifiers are unique: adding a record whose
//! identifier is already taken is an error and the existing record stays.

use crate::core::error::TdError;
use crate::core::ident;
use crate::core::todo::Todo;
use indexmap::IndexMap;
use indexmap::map::Entry as Slot;
use serde::{Deserialize, Serialize};

/// A stored record together with its identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub todo: Todo,
}

/// Selection criteria for listing. Every set criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub group: Option<char>,
    pub tags: Vec<String>,
}

impl Filter {
    /// Parse space-separated `&G` (group) and `+tag` selectors.
    pub fn parse(args: &str) -> Result<Self, TdError> {
        let mut filter = Filter::default();
        for token in args.split_whitespace() {
            if let Some(group) = token.strip_prefix('&') {
                let mut chars = group.chars();
                match (chars.next(), chars.next()) {
                    (Some(g), None) => filter.group = Some(g),
                    _ => {
                        return Err(TdError::InvalidFilter {
                            selector: token.to_string(),
                            reason: "group selector takes exactly one character".to_string(),
                        });
                    }
                }
            } else if let Some(tag) = token.strip_prefix('+').filter(|t| !t.is_empty()) {
                filter.tags.push(tag.to_string());
            } else {
                return Err(TdError::InvalidFilter {
                    selector: token.to_string(),
                    reason: "expected &GROUP or +TAG".to_string(),
                });
            }
        }
        Ok(filter)
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.group.is_none_or(|g| todo.group() == g) && self.tags.iter().all(|t| todo.has_tag(t))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    items: IndexMap<String, Todo>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, failing on the first identifier collision.
    pub fn from_todos<I>(todos: I) -> Result<Self, TdError>
    where
        I: IntoIterator<Item = Todo>,
    {
        let mut store = Self::new();
        for todo in todos {
            store.add_record(todo)?;
        }
        Ok(store)
    }

    /// Insert `todo` under its derived identifier and return that identifier.
    pub fn add_record(&mut self, todo: Todo) -> Result<String, TdError> {
        match self.items.entry(ident::generate(&todo)) {
            Slot::Occupied(slot) => {
                log::debug!("rejecting {:?}: {} is taken", todo.description(), slot.key());
                Err(TdError::DuplicateIdentifier(slot.key().clone()))
            }
            Slot::Vacant(slot) => {
                let id = slot.key().clone();
                log::debug!("added {} -> {:?}", id, todo.description());
                slot.insert(todo);
                Ok(id)
            }
        }
    }

    /// Remove and return the record stored under `id`, if any.
    pub fn remove_record(&mut self, id: &str) -> Option<Todo> {
        let removed = self.items.shift_remove(id);
        if removed.is_some() {
            log::debug!("removed {}", id);
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Todo)> {
        self.items.iter().map(|(id, todo)| (id.as_str(), todo))
    }

    /// Records matching `filter`, in insertion order.
    pub fn list(&self, filter: &Filter) -> Vec<Entry> {
        self.iter()
            .filter(|(_, todo)| filter.matches(todo))
            .map(|(id, todo)| Entry {
                id: id.to_string(),
                todo: todo.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_round_trips() {
        let mut store = TodoStore::new();
        let todo = Todo::new("Fix car").with_tags(["Roadtrip"]);
        let id = store.add_record(todo.clone()).unwrap();
        assert!(store.contains(&id));

        assert_eq!(store.remove_record(&id), Some(todo));
        assert!(!store.contains(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_is_rejected_and_original_kept() {
        let mut store = TodoStore::new();
        let original = Todo::from_line("- Take out trash +Home").unwrap();
        let id = store.add_record(original.clone()).unwrap();

        let err = store
            .add_record(Todo::from_line("B Take out trash").unwrap())
            .unwrap_err();
        match err {
            TdError::DuplicateIdentifier(dup) => assert_eq!(dup, id),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id), Some(&original));
    }

    #[test]
    fn removing_absent_id_is_none() {
        let mut store = TodoStore::new();
        store.add_record(Todo::new("File taxes")).unwrap();
        assert_eq!(store.remove_record("zzz"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn removal_preserves_order_of_the_rest() {
        let mut store =
            TodoStore::from_todos(["one", "two", "three"].map(Todo::new)).unwrap();
        let second = ident::generate_for("two");
        store.remove_record(&second);
        let left: Vec<_> = store.iter().map(|(_, t)| t.description()).collect();
        assert_eq!(left, ["one", "three"]);
    }

    #[test]
    fn from_todos_fails_on_collision() {
        let err = TodoStore::from_todos([Todo::new("same"), Todo::new("same")]).unwrap_err();
        assert!(matches!(err, TdError::DuplicateIdentifier(_)));
    }

    #[test]
    fn filter_parse_and_match() {
        let filter = Filter::parse("&A +Dev").unwrap();
        assert_eq!(filter.group, Some('A'));
        assert_eq!(filter.tags, ["Dev"]);

        assert!(filter.matches(&Todo::new("x").with_group('A').with_tags(["Dev", "Job"])));
        assert!(!filter.matches(&Todo::new("x").with_group('A')));
        assert!(!filter.matches(&Todo::new("x").with_group('B').with_tags(["Dev"])));
        assert!(Filter::default().matches(&Todo::new("anything")));

        for bad in ["&", "&AB", "+", "Dev"] {
            assert!(
                matches!(Filter::parse(bad), Err(TdError::InvalidFilter { .. })),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn list_keeps_insertion_order() {
        let store = TodoStore::from_todos([
            Todo::new("Find bug").with_group('A'),
            Todo::new("Make bread"),
            Todo::new("Call Ray").with_group('A'),
        ])
        .unwrap();
        let listed: Vec<_> = store
            .list(&Filter::parse("&A").unwrap())
            .into_iter()
            .map(|e| e.todo.description().to_string())
            .collect();
        assert_eq!(listed, ["Find bug", "Call Ray"]);
    }
}
