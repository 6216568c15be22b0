//! Hand-written reducers, one per slice, combined into the root reducer.
//!
//! Each reducer is a pure function over its own slice with an exhaustive
//! `match` on the action vocabulary.

use crate::actions::TodoAction;
use crate::types::{Todo, TodoId, TodoState};
use todux_core::composition::{combine_reducers, scope_reducer, CombinedReducer};
use todux_core::reducer::Reducer;

/// Reducer for the `todos` slice
#[derive(Clone, Debug, Default)]
pub struct TodosReducer {
    seed: Vec<Todo>,
}

impl TodosReducer {
    /// Creates a `TodosReducer` starting from `seed`
    #[must_use]
    pub const fn new(seed: Vec<Todo>) -> Self {
        Self { seed }
    }

    /// Rebuilds the list, applying `update` to the todo with `id`
    fn update(todos: &[Todo], id: &TodoId, update: impl Fn(&Todo) -> Todo) -> Vec<Todo> {
        todos
            .iter()
            .map(|todo| if &todo.id == id { update(todo) } else { todo.clone() })
            .collect()
    }
}

impl Reducer for TodosReducer {
    type State = Vec<Todo>;
    type Action = TodoAction;

    fn initial_state(&self) -> Vec<Todo> {
        self.seed.clone()
    }

    fn reduce(&self, todos: &Vec<Todo>, action: &TodoAction) -> Vec<Todo> {
        match action {
            TodoAction::CreateTodo(todo) => {
                let mut next = todos.clone();
                next.push(todo.clone());
                next
            }
            TodoAction::EditTodo { id, desc } => Self::update(todos, id, |todo| Todo {
                desc: desc.clone(),
                ..todo.clone()
            }),
            TodoAction::ToggleTodo { id, is_complete } => {
                Self::update(todos, id, |todo| todo.clone().completed(*is_complete))
            }
            TodoAction::DeleteTodo { id } => {
                let mut next = todos.clone();
                if let Some(index) = next.iter().position(|todo| &todo.id == id) {
                    next.remove(index);
                }
                next
            }
            TodoAction::SelectTodo { .. } => todos.clone(),
        }
    }
}

/// Reducer for the `selectedTodo` slice
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectedTodoReducer;

impl Reducer for SelectedTodoReducer {
    type State = Option<TodoId>;
    type Action = TodoAction;

    fn initial_state(&self) -> Option<TodoId> {
        None
    }

    fn reduce(&self, selected: &Option<TodoId>, action: &TodoAction) -> Option<TodoId> {
        match action {
            TodoAction::SelectTodo { id } => Some(id.clone()),
            // Deleting the selected todo leaves the selection dangling
            TodoAction::CreateTodo(_)
            | TodoAction::EditTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => selected.clone(),
        }
    }
}

/// Reducer for the `counter` slice
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = u64;
    type Action = TodoAction;

    fn initial_state(&self) -> u64 {
        0
    }

    fn reduce(&self, counter: &u64, action: &TodoAction) -> u64 {
        match action {
            // Counts even when no todo matched the id
            TodoAction::CreateTodo(_)
            | TodoAction::EditTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => counter + 1,
            TodoAction::SelectTodo { .. } => *counter,
        }
    }
}

/// The root reducer: `todos`, `selectedTodo` and `counter` combined
#[must_use]
pub fn root_reducer(seed: Vec<Todo>) -> CombinedReducer<TodoState, TodoAction> {
    combine_reducers(vec![
        Box::new(scope_reducer(
            "todos",
            TodosReducer::new(seed),
            |s: &TodoState| &s.todos,
            |s: &mut TodoState, todos| s.todos = todos,
        )),
        Box::new(scope_reducer(
            "selectedTodo",
            SelectedTodoReducer,
            |s: &TodoState| &s.selected_todo,
            |s: &mut TodoState, selected| s.selected_todo = selected,
        )),
        Box::new(scope_reducer(
            "counter",
            CounterReducer,
            |s: &TodoState| &s.counter,
            |s: &mut TodoState, counter| s.counter = counter,
        )),
    ])
}
