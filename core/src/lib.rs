//! # Todux Core
//!
//! Core traits and types for the Todux state container.
//!
//! This crate provides the pure half of the architecture: the vocabulary of
//! actions, the reducers that fold them into state, and the utilities that
//! assemble independent reducers into a single state tree.
//!
//! ## Core Concepts
//!
//! - **Action**: An immutable, tagged request describing one state change
//! - **Reducer**: Pure function `(State, Action) → State`
//! - **Slice**: One independently-updatable region of the state tree
//! - **Environment**: Injected effectful primitives (identifier generation)
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - New values, never in-place mutation of the previous state
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use todux_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = u64;
//!     type Action = CounterAction;
//!
//!     fn initial_state(&self) -> u64 {
//!         0
//!     }
//!
//!     fn reduce(&self, state: &u64, action: &CounterAction) -> u64 {
//!         match action {
//!             CounterAction::Increment => state + 1,
//!             CounterAction::Reset => 0,
//!         }
//!     }
//! }
//!
//! let next = CounterReducer.reduce_or_init(None, &CounterAction::Increment);
//! assert_eq!(next, 1);
//! ```

/// Reducer composition utilities
pub mod composition;

/// Slice builder for reducers assembled from per-kind case handlers
pub mod slice;

/// Action module - the tagged request vocabulary
///
/// Actions are plain enums. Every action exposes an explicit enumerated tag
/// (its [`Action::Kind`]) so that reducers of other slices can react to it by
/// matching on the tag rather than on a string key.
///
/// The `todux-macros` crate derives this trait together with the tag enum.
pub mod action {
    use std::fmt::Debug;
    use std::hash::Hash;

    /// Common behaviour of every action type
    ///
    /// # Example
    ///
    /// ```
    /// use todux_core::action::Action;
    ///
    /// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    /// enum LampKind {
    ///     Switch,
    /// }
    ///
    /// enum LampAction {
    ///     Switch { on: bool },
    /// }
    ///
    /// impl Action for LampAction {
    ///     type Kind = LampKind;
    ///
    ///     fn kind(&self) -> LampKind {
    ///         LampKind::Switch
    ///     }
    ///
    ///     fn action_type(&self) -> &'static str {
    ///         "lamp/switch"
    ///     }
    /// }
    ///
    /// assert_eq!(LampAction::Switch { on: true }.action_type(), "lamp/switch");
    /// ```
    pub trait Action {
        /// Fieldless tag identifying the variant of an action
        type Kind: Copy + Eq + Hash + Debug;

        /// Returns the tag of this action
        fn kind(&self) -> Self::Kind;

        /// Returns the human readable type name (e.g. `"todos/create"`)
        ///
        /// Used for logging, metric labels and inspection only. State
        /// transitions never branch on it.
        fn action_type(&self) -> &'static str;
    }
}

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → State`
///
/// They contain all state-transition logic, are deterministic and total:
/// every action is accepted, actions a reducer does not care about leave its
/// state unchanged.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or slice of state) this reducer produces
    /// - `Action`: The action type this reducer processes
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The fixed value this reducer starts from
        fn initial_state(&self) -> Self::State;

        /// Compute the next state from the current state and an action
        ///
        /// Must not mutate shared structure: the returned value is a brand
        /// new state. Unrecognized actions return a value equal to `state`.
        fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State;

        /// Reduce, substituting [`Reducer::initial_state`] when there is no
        /// current state yet
        fn reduce_or_init(
            &self,
            state: Option<&Self::State>,
            action: &Self::Action,
        ) -> Self::State {
            match state {
                Some(state) => self.reduce(state, action),
                None => self.reduce(&self.initial_state(), action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All effectful primitives are abstracted behind traits and injected into
/// the code that needs them. Reducers never see the environment.
pub mod environment {
    /// Identifier generator - abstracts id minting for testability
    ///
    /// Every call returns a value distinct from every value previously
    /// returned for the lifetime of the process.
    ///
    /// # Examples
    ///
    /// ```
    /// use todux_core::environment::{IdGenerator, UuidGenerator};
    ///
    /// let ids = UuidGenerator;
    /// assert_ne!(ids.generate(), ids.generate());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn generate(&self) -> String;
    }

    /// Random UUID (v4) identifiers
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn generate(&self) -> String {
            uuid::Uuid::new_v4().to_string()
        }
    }
}
