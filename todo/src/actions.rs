//! The action vocabulary and its creators.
//!
//! Creators are the only sanctioned way to build actions. `create_todo` is the
//! one place a fresh id is minted; reducers never generate ids.

use crate::types::{seed_todos, Todo, TodoId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use todux_core::environment::{IdGenerator, UuidGenerator};
use todux_macros::Action;

/// Requests that can alter the todo state
///
/// Serialized as `{ "type": "todos/create", "payload": { ... } }`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TodoAction {
    /// Append a new todo (already carrying its fresh id)
    #[action(name = "todos/create")]
    #[serde(rename = "todos/create")]
    CreateTodo(Todo),

    /// Replace the description of a todo
    #[action(name = "todos/edit")]
    #[serde(rename = "todos/edit")]
    EditTodo {
        /// Todo to edit
        id: TodoId,
        /// New description
        desc: String,
    },

    /// Set the completion flag of a todo
    #[action(name = "todos/toggle")]
    #[serde(rename = "todos/toggle", rename_all = "camelCase")]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
        /// New completion flag
        is_complete: bool,
    },

    /// Remove a todo
    #[action(name = "todos/remove")]
    #[serde(rename = "todos/remove")]
    DeleteTodo {
        /// Todo to remove
        id: TodoId,
    },

    /// Select a todo, without checking that it exists
    #[action(name = "selectedTodo/select")]
    #[serde(rename = "selectedTodo/select")]
    SelectTodo {
        /// Todo to select
        id: TodoId,
    },
}

impl TodoActionKind {
    /// Kinds counted by the counter slice
    pub const MUTATING: [Self; 4] = [
        Self::CreateTodo,
        Self::EditTodo,
        Self::ToggleTodo,
        Self::DeleteTodo,
    ];

    /// Whether actions of this kind change the todo list
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::CreateTodo | Self::EditTodo | Self::ToggleTodo | Self::DeleteTodo
        )
    }
}

/// Builds a `CreateTodo` action with a freshly minted id
#[must_use]
pub fn create_todo(desc: impl Into<String>, ids: &dyn IdGenerator) -> TodoAction {
    TodoAction::CreateTodo(Todo::new(TodoId::generate(ids), desc))
}

/// Builds an `EditTodo` action
#[must_use]
pub fn edit_todo(id: impl Into<TodoId>, desc: impl Into<String>) -> TodoAction {
    TodoAction::EditTodo {
        id: id.into(),
        desc: desc.into(),
    }
}

/// Builds a `ToggleTodo` action
#[must_use]
pub fn toggle_todo(id: impl Into<TodoId>, is_complete: bool) -> TodoAction {
    TodoAction::ToggleTodo {
        id: id.into(),
        is_complete,
    }
}

/// Builds a `DeleteTodo` action
#[must_use]
pub fn delete_todo(id: impl Into<TodoId>) -> TodoAction {
    TodoAction::DeleteTodo { id: id.into() }
}

/// Builds a `SelectTodo` action
#[must_use]
pub fn select_todo(id: impl Into<TodoId>) -> TodoAction {
    TodoAction::SelectTodo { id: id.into() }
}

/// Environment dependencies for the todo action creators
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Generator minting todo ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Production environment backed by random UUIDs
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(UuidGenerator))
    }

    /// Builds a `CreateTodo` action with an id from this environment
    #[must_use]
    pub fn create_todo(&self, desc: impl Into<String>) -> TodoAction {
        create_todo(desc, self.ids.as_ref())
    }

    /// The seed list, with ids from this environment
    #[must_use]
    pub fn seed(&self) -> Vec<Todo> {
        seed_todos(self.ids.as_ref())
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
mod tests {
    use super::*;
    use todux_core::action::Action;
    use todux_testing::{shared_test_ids, SequentialIdGenerator};

    #[test]
    fn create_todo_mints_fresh_ids() {
        let ids = SequentialIdGenerator::new();

        let first = create_todo("Write docs", &ids);
        let second = create_todo("Write docs", &ids);

        assert_eq!(
            first,
            TodoAction::CreateTodo(Todo::new(TodoId::from("todo-1"), "Write docs"))
        );
        assert_ne!(first, second);
    }

    #[test]
    fn action_types() {
        assert_eq!(edit_todo("a", "b").action_type(), "todos/edit");
        assert_eq!(toggle_todo("a", true).action_type(), "todos/toggle");
        assert_eq!(delete_todo("a").action_type(), "todos/remove");
        assert_eq!(select_todo("a").action_type(), "selectedTodo/select");
        assert_eq!(TodoActionKind::CreateTodo.action_type(), "todos/create");
    }

    #[test]
    fn mutating_kinds() {
        let mutating: Vec<_> = TodoActionKind::ALL
            .into_iter()
            .filter(|kind| kind.is_mutating())
            .collect();

        assert_eq!(mutating, TodoActionKind::MUTATING);
        assert!(!TodoActionKind::SelectTodo.is_mutating());
    }

    #[test]
    fn environment_creates_and_seeds() {
        let env = TodoEnvironment::new(shared_test_ids());

        let seed = env.seed();
        let action = env.create_todo("Learn Systems Design");

        assert_eq!(seed.len(), 3);
        assert_eq!(action.kind(), TodoActionKind::CreateTodo);
        assert_eq!(
            action,
            TodoAction::CreateTodo(Todo::new(TodoId::from("todo-4"), "Learn Systems Design"))
        );
    }

    #[test]
    fn actions_serialize_with_type_and_payload() {
        let json = serde_json::to_value(toggle_todo("a", true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "todos/toggle",
                "payload": { "id": "a", "isComplete": true }
            })
        );

        let action: TodoAction = serde_json::from_value(serde_json::json!({
            "type": "selectedTodo/select",
            "payload": { "id": "b" }
        }))
        .unwrap();
        assert_eq!(action, select_todo("b"));
    }
}
