//! Reducer composition utilities
//!
//! This module provides utilities for assembling one state tree out of
//! independent reducers:
//! - **`scope_reducer`**: Focus a reducer on one named slice of a parent state
//! - **`combine_reducers`**: Run every scoped reducer on the same action and
//!   reassemble their slices into the next parent state
//!
//! # Examples
//!
//! ```
//! use todux_core::composition::{combine_reducers, scope_reducer};
//! use todux_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct AppState {
//!     count: i32,
//!     name: String,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Increment,
//!     SetName(String),
//! }
//!
//! struct CountReducer;
//! struct NameReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = i32;
//!     type Action = AppAction;
//!
//!     fn initial_state(&self) -> i32 {
//!         0
//!     }
//!
//!     fn reduce(&self, state: &i32, action: &AppAction) -> i32 {
//!         match action {
//!             AppAction::Increment => state + 1,
//!             AppAction::SetName(_) => *state,
//!         }
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = String;
//!     type Action = AppAction;
//!
//!     fn initial_state(&self) -> String {
//!         "anonymous".to_string()
//!     }
//!
//!     fn reduce(&self, state: &String, action: &AppAction) -> String {
//!         match action {
//!             AppAction::SetName(name) => name.clone(),
//!             AppAction::Increment => state.clone(),
//!         }
//!     }
//! }
//!
//! let root = combine_reducers(vec![
//!     Box::new(scope_reducer("count", CountReducer, |s: &AppState| &s.count, |s: &mut AppState, v| s.count = v)),
//!     Box::new(scope_reducer("name", NameReducer, |s: &AppState| &s.name, |s: &mut AppState, v| s.name = v)),
//! ]);
//!
//! let state = root.initial_state();
//! assert_eq!(state.name, "anonymous");
//!
//! let state = root.reduce(&state, &AppAction::Increment);
//! assert_eq!(state.count, 1);
//! ```

use crate::reducer::Reducer;

/// A reducer responsible for exactly one named slice of a parent state `S`.
///
/// This is what [`combine_reducers`] drives. It is usually obtained from
/// [`scope_reducer`].
pub trait SliceReducer<S, A> {
    /// Name of the sub-state this reducer owns (e.g. `"todos"`)
    fn key(&self) -> &'static str;

    /// Write this slice's initial value into `state`
    fn init_slice(&self, state: &mut S);

    /// Compute this slice from `previous` and write it into `next`
    ///
    /// Only this slice of `previous` may be read, only this slice of `next`
    /// may be written.
    fn reduce_slice(&self, previous: &S, next: &mut S, action: &A);
}

/// Combines slice reducers into one reducer over the whole state tree.
///
/// Every action is handed to every slice reducer together with its own slice
/// of the previous state. Slices are independent, so registration order has
/// no influence on the result.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `A`: The action type
#[must_use]
pub fn combine_reducers<S, A>(
    slices: Vec<Box<dyn SliceReducer<S, A> + Send + Sync>>,
) -> CombinedReducer<S, A>
where
    S: Clone + Default,
{
    CombinedReducer { slices }
}

/// A root reducer assembled from independent slice reducers.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A> {
    slices: Vec<Box<dyn SliceReducer<S, A> + Send + Sync>>,
}

impl<S, A> CombinedReducer<S, A> {
    /// Names of the combined slices, in registration order
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.slices.iter().map(|slice| slice.key()).collect()
    }
}

impl<S, A> std::fmt::Debug for CombinedReducer<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("keys", &self.keys())
            .finish()
    }
}

impl<S, A> Reducer for CombinedReducer<S, A>
where
    S: Clone + Default,
{
    type State = S;
    type Action = A;

    fn initial_state(&self) -> S {
        let mut state = S::default();
        for slice in &self.slices {
            slice.init_slice(&mut state);
        }
        state
    }

    fn reduce(&self, state: &S, action: &A) -> S {
        let mut next = state.clone();
        for slice in &self.slices {
            slice.reduce_slice(state, &mut next, action);
        }
        next
    }
}

/// Scopes a reducer to one named slice of a larger state.
///
/// `get_state` borrows the slice out of the parent, `set_state` stores a new
/// slice value into the parent.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `R`: The slice reducer, whose `State` is the slice type
pub fn scope_reducer<S, R>(
    key: &'static str,
    reducer: R,
    get_state: fn(&S) -> &R::State,
    set_state: fn(&mut S, R::State),
) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer {
        key,
        reducer,
        get_state,
        set_state,
    }
}

/// A reducer focused on one slice of a parent state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    R: Reducer,
{
    key: &'static str,
    reducer: R,
    get_state: fn(&S) -> &R::State,
    set_state: fn(&mut S, R::State),
}

impl<S, R> ScopedReducer<S, R>
where
    R: Reducer,
{
    /// The wrapped slice reducer
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.reducer
    }
}

impl<S, R> SliceReducer<S, R::Action> for ScopedReducer<S, R>
where
    R: Reducer,
{
    fn key(&self) -> &'static str {
        self.key
    }

    fn init_slice(&self, state: &mut S) {
        (self.set_state)(state, self.reducer.initial_state());
    }

    fn reduce_slice(&self, previous: &S, next: &mut S, action: &R::Action) {
        let slice = self.reducer.reduce((self.get_state)(previous), action);
        (self.set_state)(next, slice);
    }
}
