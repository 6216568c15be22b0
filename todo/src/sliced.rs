//! Slice-built reducers.
//!
//! Same state tree and behaviour as [`crate::classic`], but each slice is a
//! table of case handlers working on a draft copy. The counter slice reacts
//! to the todo kinds by registering them explicitly.

use crate::actions::{TodoAction, TodoActionKind};
use crate::types::{Todo, TodoId, TodoState};
use todux_core::composition::{combine_reducers, scope_reducer, CombinedReducer};
use todux_core::slice::Slice;

/// The `todos` slice
#[must_use]
pub fn todos_slice(seed: Vec<Todo>) -> Slice<Vec<Todo>, TodoAction> {
    Slice::<Vec<Todo>, TodoAction>::new("todos", seed)
        .on(TodoActionKind::CreateTodo, |mut todos, action| {
            if let TodoAction::CreateTodo(todo) = action {
                todos.push(todo.clone());
            }
            todos
        })
        .on(TodoActionKind::EditTodo, |mut todos, action| {
            if let TodoAction::EditTodo { id, desc } = action {
                if let Some(todo) = find_mut(&mut todos, id) {
                    todo.desc.clone_from(desc);
                }
            }
            todos
        })
        .on(TodoActionKind::ToggleTodo, |mut todos, action| {
            if let TodoAction::ToggleTodo { id, is_complete } = action {
                if let Some(todo) = find_mut(&mut todos, id) {
                    todo.is_complete = *is_complete;
                }
            }
            todos
        })
        .on(TodoActionKind::DeleteTodo, |mut todos, action| {
            if let TodoAction::DeleteTodo { id } = action {
                if let Some(index) = todos.iter().position(|todo| &todo.id == id) {
                    todos.remove(index);
                }
            }
            todos
        })
}

fn find_mut<'a>(todos: &'a mut [Todo], id: &TodoId) -> Option<&'a mut Todo> {
    todos.iter_mut().find(|todo| &todo.id == id)
}

/// The `selectedTodo` slice
#[must_use]
pub fn selected_todo_slice() -> Slice<Option<TodoId>, TodoAction> {
    Slice::<Option<TodoId>, TodoAction>::new("selectedTodo", None).on(
        TodoActionKind::SelectTodo,
        |selected, action| match action {
            TodoAction::SelectTodo { id } => Some(id.clone()),
            _ => selected,
        },
    )
}

/// The `counter` slice, counting every mutating todo action
#[must_use]
pub fn counter_slice() -> Slice<u64, TodoAction> {
    Slice::<u64, TodoAction>::new("counter", 0)
        .on_each(&TodoActionKind::MUTATING, |counter, _action| counter + 1)
}

/// The root reducer: `todos`, `selectedTodo` and `counter` combined
#[must_use]
pub fn root_reducer(seed: Vec<Todo>) -> CombinedReducer<TodoState, TodoAction> {
    combine_reducers(vec![
        Box::new(scope_reducer(
            "todos",
            todos_slice(seed),
            |s: &TodoState| &s.todos,
            |s: &mut TodoState, todos| s.todos = todos,
        )),
        Box::new(scope_reducer(
            "selectedTodo",
            selected_todo_slice(),
            |s: &TodoState| &s.selected_todo,
            |s: &mut TodoState, selected| s.selected_todo = selected,
        )),
        Box::new(scope_reducer(
            "counter",
            counter_slice(),
            |s: &TodoState| &s.counter,
            |s: &mut TodoState, counter| s.counter = counter,
        )),
    ])
}
