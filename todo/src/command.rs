//! JSON command boundary.
//!
//! Callers supply only the partial payload of an action (a description, an
//! id, a flag). Commands are parsed here, at the edge, and turned into full
//! actions by the creators; the reducers themselves never fail.

use crate::actions::{delete_todo, edit_todo, select_todo, toggle_todo, TodoAction, TodoEnvironment};
use crate::store::TodoStore;
use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use thiserror::Error;

/// Errors raised while reading a command
#[derive(Error, Debug)]
pub enum CommandError {
    /// The input was blank
    #[error("Empty command")]
    Empty,

    /// The input was not a well-formed command
    #[error("Malformed command: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The input bytes were not UTF-8
    #[error("Command is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// A caller-supplied request, one per action kind
///
/// ```json
/// {"type": "create", "desc": "Learn Systems Design"}
/// {"type": "toggle", "id": "todo-1", "isComplete": true}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TodoCommand {
    /// Create a todo
    Create {
        /// Description of the new todo
        desc: String,
    },
    /// Edit a todo's description
    Edit {
        /// Todo to edit
        id: TodoId,
        /// New description
        desc: String,
    },
    /// Set a todo's completion flag
    Toggle {
        /// Todo to toggle
        id: TodoId,
        /// New completion flag
        #[serde(rename = "isComplete")]
        is_complete: bool,
    },
    /// Delete a todo
    Delete {
        /// Todo to delete
        id: TodoId,
    },
    /// Select a todo
    Select {
        /// Todo to select
        id: TodoId,
    },
}

impl TodoCommand {
    /// Parses one JSON command
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Empty`] for blank input and
    /// [`CommandError::Malformed`] for invalid JSON, an unknown `type` or a
    /// missing field.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }
        Ok(serde_json::from_str(input)?)
    }

    /// Parses one JSON command from raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Encoding`] when `input` is not UTF-8, otherwise
    /// the same errors as [`TodoCommand::parse`].
    pub fn parse_bytes(input: &[u8]) -> Result<Self, CommandError> {
        Self::parse(std::str::from_utf8(input)?)
    }

    /// Turns the command into an action through the matching creator
    #[must_use]
    pub fn into_action(self, env: &TodoEnvironment) -> TodoAction {
        match self {
            Self::Create { desc } => env.create_todo(desc),
            Self::Edit { id, desc } => edit_todo(id, desc),
            Self::Toggle { id, is_complete } => toggle_todo(id, is_complete),
            Self::Delete { id } => delete_todo(id),
            Self::Select { id } => select_todo(id),
        }
    }
}

/// Dispatches one command per line of `reader`, returning how many lines
/// were rejected
///
/// Blank lines are skipped. A line that fails to decode or parse is logged
/// and counted, and reading carries on with the next line.
///
/// # Errors
///
/// Returns an error only when `reader` itself fails.
pub fn apply_commands(
    store: &mut TodoStore,
    env: &TodoEnvironment,
    reader: impl BufRead,
) -> std::io::Result<usize> {
    let mut rejected = 0_usize;

    for (number, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if line.trim_ascii().is_empty() {
            continue;
        }

        match TodoCommand::parse_bytes(&line) {
            Ok(command) => store.dispatch(command.into_action(env)),
            Err(error) => {
                rejected += 1;
                tracing::warn!(line = number + 1, %error, "Skipping command");
            }
        }
    }

    Ok(rejected)
}

impl std::str::FromStr for TodoCommand {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
mod tests {
    use super::*;
    use crate::types::Todo;
    use todux_testing::shared_test_ids;

    #[test]
    fn parses_every_command() {
        let cases = [
            (r#"{"type":"create","desc":"Learn Systems Design"}"#, TodoCommand::Create {
                desc: "Learn Systems Design".to_string(),
            }),
            (r#"{"type":"edit","id":"a","desc":"b"}"#, TodoCommand::Edit {
                id: TodoId::from("a"),
                desc: "b".to_string(),
            }),
            (r#"{"type":"toggle","id":"a","isComplete":true}"#, TodoCommand::Toggle {
                id: TodoId::from("a"),
                is_complete: true,
            }),
            (r#" {"type":"delete","id":"a"} "#, TodoCommand::Delete {
                id: TodoId::from("a"),
            }),
            (r#"{"type":"select","id":"a"}"#, TodoCommand::Select {
                id: TodoId::from("a"),
            }),
        ];

        for (input, expected) in cases {
            assert_eq!(TodoCommand::parse(input).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(TodoCommand::parse("   "), Err(CommandError::Empty)));
        assert!(matches!(
            TodoCommand::parse(r#"{"type":"archive","id":"a"}"#),
            Err(CommandError::Malformed(_))
        ));
        assert!(matches!(
            TodoCommand::parse(r#"{"type":"edit","id":"a"}"#),
            Err(CommandError::Malformed(_))
        ));
        assert!("not json".parse::<TodoCommand>().is_err());
        assert!(matches!(
            TodoCommand::parse_bytes(b"\xff\xfe"),
            Err(CommandError::Encoding(_))
        ));
    }

    #[test]
    fn apply_commands_skips_unreadable_lines() {
        let env = TodoEnvironment::new(shared_test_ids());
        let mut store = crate::configure_store(
            crate::Flavor::Classic,
            &env,
            &todux_runtime::StoreConfig::default()
                .with_logger(false)
                .with_devtools(false),
        );
        let input: &[u8] = b"\xff\xfe\n\n{\"type\":\"create\",\"desc\":\"x\"}\nnot json\r\n{\"type\":\"select\",\"id\":\"todo-4\"}";

        let rejected = apply_commands(&mut store, &env, input).unwrap();

        let state = store.get_state();
        assert_eq!(rejected, 2);
        assert_eq!(store.dispatch_count(), 2);
        assert_eq!(state.counter, 1);
        assert_eq!(state.selected().map(|t| t.desc.as_str()), Some("x"));
    }

    #[test]
    fn create_mints_id_from_environment() {
        let env = TodoEnvironment::new(shared_test_ids());

        let action = TodoCommand::Create {
            desc: "Write tests".to_string(),
        }
        .into_action(&env);

        assert_eq!(
            action,
            TodoAction::CreateTodo(Todo::new(TodoId::from("todo-1"), "Write tests"))
        );
    }

    #[test]
    fn other_commands_map_to_creators() {
        let env = TodoEnvironment::new(shared_test_ids());

        let action = TodoCommand::Toggle {
            id: TodoId::from("a"),
            is_complete: false,
        }
        .into_action(&env);

        assert_eq!(action, toggle_todo("a", false));
    }
}
