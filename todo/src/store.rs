//! Store wiring for the todo list.
//!
//! The store is constructed explicitly by the entry point and handed to
//! whatever needs it; there is no global instance.

use crate::actions::{TodoAction, TodoEnvironment};
use crate::types::{Todo, TodoState};
use crate::{classic, sliced};
use thiserror::Error;
use todux_core::composition::CombinedReducer;
use todux_runtime::{Store, StoreConfig};

/// Environment key selecting the reducer flavour
pub const FLAVOR_KEY: &str = "TODUX_FLAVOR";

/// The root reducer type shared by both flavours
pub type TodoReducer = CombinedReducer<TodoState, TodoAction>;

/// A store over the todo state tree
pub type TodoStore = Store<TodoReducer>;

/// Which reducer implementation backs the store
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flavor {
    /// Hand-written reducers ([`crate::classic`])
    #[default]
    Classic,
    /// Slice-built reducers ([`crate::sliced`])
    Sliced,
}

/// Error for an unrecognised flavour name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown reducer flavour {0:?} (expected \"classic\" or \"sliced\")")]
pub struct UnknownFlavor(pub String);

impl Flavor {
    /// Both flavours
    pub const ALL: [Self; 2] = [Self::Classic, Self::Sliced];

    /// Lower-case name of the flavour
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Sliced => "sliced",
        }
    }

    /// Builds this flavour's root reducer
    #[must_use]
    pub fn root_reducer(self, seed: Vec<Todo>) -> TodoReducer {
        match self {
            Self::Classic => classic::root_reducer(seed),
            Self::Sliced => sliced::root_reducer(seed),
        }
    }

    /// Reads `TODUX_FLAVOR`, defaulting to [`Flavor::Classic`]
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFlavor`] if the variable names no flavour.
    pub fn from_env() -> Result<Self, UnknownFlavor> {
        std::env::var(FLAVOR_KEY).map_or(Ok(Self::default()), |value| value.parse())
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Flavor {
    type Err = UnknownFlavor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "sliced" | "slice" => Ok(Self::Sliced),
            _ => Err(UnknownFlavor(value.to_string())),
        }
    }
}

/// Builds a store seeded with the fixed seed list
///
/// The seed ids are minted from `env` once, here.
#[must_use]
pub fn configure_store(flavor: Flavor, env: &TodoEnvironment, config: &StoreConfig) -> TodoStore {
    tracing::info!(%flavor, "Configuring todo store");
    Store::with_config(flavor.root_reducer(env.seed()), config)
}
