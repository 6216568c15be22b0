//! Todo list state container built on Todux.
//!
//! A single state tree (`todos`, `selectedTodo`, `counter`) updated only
//! through a closed set of actions. It demonstrates:
//!
//! - An action vocabulary with `#[derive(Action)]`
//! - Action creators with an injected id generator
//! - Two interchangeable reducer flavours: hand-written ([`classic`]) and
//!   slice-built ([`sliced`])
//! - A synchronous store with logger and devtools middleware
//! - A JSON command boundary
//!
//! # Quick Start
//!
//! ```
//! use todo::{configure_store, Flavor, TodoEnvironment};
//! use todux_runtime::StoreConfig;
//!
//! let env = TodoEnvironment::production();
//! let mut store = configure_store(Flavor::Classic, &env, &StoreConfig::default());
//!
//! // Create a todo
//! let create = env.create_todo("Learn Systems Design");
//! store.dispatch(create);
//!
//! // Read state
//! assert_eq!(store.get_state().count(), 4);
//! assert_eq!(store.get_state().counter, 1);
//! ```

pub mod actions;
pub mod classic;
pub mod command;
pub mod sliced;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use actions::{
    create_todo, delete_todo, edit_todo, select_todo, toggle_todo, TodoAction, TodoActionKind,
    TodoEnvironment,
};
pub use command::{apply_commands, CommandError, TodoCommand};
pub use store::{configure_store, Flavor, TodoReducer, TodoStore, UnknownFlavor};
pub use types::{seed_todos, Todo, TodoId, TodoState};
