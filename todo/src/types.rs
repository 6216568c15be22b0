//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of todo records, an optional pointer to
//! the selected record and a counter of accepted mutations.

use serde::{Deserialize, Serialize};
use todux_core::environment::IdGenerator;

/// Unique identifier for a todo item
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a `TodoId` from an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh `TodoId`
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.generate())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier, immutable once assigned
    pub id: TodoId,
    /// Task description
    pub desc: String,
    /// Whether the task is done
    pub is_complete: bool,
}

impl Todo {
    /// Creates a new, incomplete todo
    #[must_use]
    pub fn new(id: TodoId, desc: impl Into<String>) -> Self {
        Self {
            id,
            desc: desc.into(),
            is_complete: false,
        }
    }

    /// Sets the completion flag
    #[must_use]
    pub const fn completed(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }
}

/// The whole state tree
///
/// Serialized as `{ "todos": [...], "selectedTodo": ..., "counter": ... }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    /// Todos in insertion order
    pub todos: Vec<Todo>,
    /// The selected todo; may name a todo that no longer exists
    pub selected_todo: Option<TodoId>,
    /// Number of accepted mutating actions
    pub counter: u64,
}

impl TodoState {
    /// Creates a state holding `todos`, with nothing selected and the counter at zero
    #[must_use]
    pub const fn new(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            selected_todo: None,
            counter: 0,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_complete).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the selected todo, if the selection names an existing todo
    #[must_use]
    pub fn selected(&self) -> Option<&Todo> {
        self.selected_todo.as_ref().and_then(|id| self.get(id))
    }
}

/// The fixed seed list, with freshly minted ids
#[must_use]
pub fn seed_todos(ids: &dyn IdGenerator) -> Vec<Todo> {
    vec![
        Todo::new(TodoId::generate(ids), "Learn React").completed(true),
        Todo::new(TodoId::generate(ids), "Learn Redux").completed(true),
        Todo::new(TodoId::generate(ids), "Learn Redux-ToolKit"),
    ]
}
