//! Slice reducers assembled from per-kind case handlers
//!
//! A [`Slice`] is a reducer described as a table instead of a hand-written
//! `match`: each action kind it reacts to is registered with a handler, every
//! other kind leaves the slice unchanged.
//!
//! Handlers receive an owned working copy of the current slice (the "draft"),
//! may mutate it freely and hand it back. The previous value is never
//! touched, so no change tracking is involved.
//!
//! # Example
//!
//! ```
//! use todux_core::action::Action;
//! use todux_core::reducer::Reducer;
//! use todux_core::slice::Slice;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum ShelfKind {
//!     Add,
//!     Clear,
//! }
//!
//! enum ShelfAction {
//!     Add(String),
//!     Clear,
//! }
//!
//! impl Action for ShelfAction {
//!     type Kind = ShelfKind;
//!
//!     fn kind(&self) -> ShelfKind {
//!         match self {
//!             ShelfAction::Add(_) => ShelfKind::Add,
//!             ShelfAction::Clear => ShelfKind::Clear,
//!         }
//!     }
//!
//!     fn action_type(&self) -> &'static str {
//!         match self {
//!             ShelfAction::Add(_) => "shelf/add",
//!             ShelfAction::Clear => "shelf/clear",
//!         }
//!     }
//! }
//!
//! let shelf = Slice::<Vec<String>, ShelfAction>::new("shelf", Vec::new())
//!     .on(ShelfKind::Add, |mut books, action| {
//!         if let ShelfAction::Add(title) = action {
//!             books.push(title.clone());
//!         }
//!         books
//!     });
//!
//! let books = shelf.reduce(&shelf.initial_state(), &ShelfAction::Add("Dune".into()));
//! assert_eq!(books, vec!["Dune".to_string()]);
//!
//! // Clear has no handler registered: identity
//! assert_eq!(shelf.reduce(&books, &ShelfAction::Clear), books);
//! ```

use crate::action::Action;
use crate::reducer::Reducer;
use std::collections::HashMap;

/// Boxed case handler: takes the draft and the action, returns the next value
type CaseHandler<T, A> = Box<dyn Fn(T, &A) -> T + Send + Sync>;

/// A named slice of state with its initial value and case handlers
pub struct Slice<T, A>
where
    A: Action,
{
    name: &'static str,
    initial: T,
    cases: HashMap<A::Kind, CaseHandler<T, A>>,
}

impl<T, A> Slice<T, A>
where
    T: Clone,
    A: Action,
{
    /// Create a slice with no handlers
    #[must_use]
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            name,
            initial,
            cases: HashMap::new(),
        }
    }

    /// Register the handler for one action kind
    ///
    /// Registering the same kind twice replaces the earlier handler.
    #[must_use]
    pub fn on<F>(mut self, kind: A::Kind, handler: F) -> Self
    where
        F: Fn(T, &A) -> T + Send + Sync + 'static,
    {
        self.cases.insert(kind, Box::new(handler));
        self
    }

    /// Register one handler for several action kinds
    ///
    /// This is how a slice reacts to actions owned by another slice.
    #[must_use]
    pub fn on_each<F>(mut self, kinds: &[A::Kind], handler: F) -> Self
    where
        F: Fn(T, &A) -> T + Clone + Send + Sync + 'static,
    {
        for kind in kinds {
            self.cases.insert(*kind, Box::new(handler.clone()));
        }
        self
    }

    /// The slice name (e.g. `"todos"`)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a handler is registered for `kind`
    #[must_use]
    pub fn handles(&self, kind: A::Kind) -> bool {
        self.cases.contains_key(&kind)
    }

    /// Kinds with a registered handler, in no particular order
    #[must_use]
    pub fn handled_kinds(&self) -> Vec<A::Kind> {
        self.cases.keys().copied().collect()
    }
}

impl<T, A> std::fmt::Debug for Slice<T, A>
where
    T: std::fmt::Debug,
    A: Action,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slice")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .field("cases", &self.cases.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T, A> Reducer for Slice<T, A>
where
    T: Clone,
    A: Action,
{
    type State = T;
    type Action = A;

    fn initial_state(&self) -> T {
        self.initial.clone()
    }

    fn reduce(&self, state: &T, action: &A) -> T {
        match self.cases.get(&action.kind()) {
            Some(handler) => handler(state.clone(), action),
            None => state.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum TestKind {
        Add,
        Sub,
        Rename,
    }

    enum TestAction {
        Add(i64),
        Sub(i64),
        Rename(String),
    }

    impl Action for TestAction {
        type Kind = TestKind;

        fn kind(&self) -> TestKind {
            match self {
                Self::Add(_) => TestKind::Add,
                Self::Sub(_) => TestKind::Sub,
                Self::Rename(_) => TestKind::Rename,
            }
        }

        fn action_type(&self) -> &'static str {
            match self {
                Self::Add(_) => "math/add",
                Self::Sub(_) => "math/sub",
                Self::Rename(_) => "label/rename",
            }
        }
    }

    fn math() -> Slice<i64, TestAction> {
        Slice::<i64, TestAction>::new("math", 0)
            .on(TestKind::Add, |value, action| match action {
                TestAction::Add(n) => value + n,
                _ => value,
            })
            .on(TestKind::Sub, |value, action| match action {
                TestAction::Sub(n) => value - n,
                _ => value,
            })
    }

    #[test]
    fn test_registered_cases_apply() {
        let slice = math();
        let value = slice.reduce(&slice.initial_state(), &TestAction::Add(5));
        assert_eq!(value, 5);
        assert_eq!(slice.reduce(&value, &TestAction::Sub(2)), 3);
    }

    #[test]
    fn test_unregistered_kind_is_identity() {
        let slice = math();
        assert_eq!(slice.reduce(&7, &TestAction::Rename("x".into())), 7);
        assert!(!slice.handles(TestKind::Rename));
    }

    #[test]
    fn test_on_each_shares_handler() {
        let slice =
            Slice::<u32, TestAction>::new("touches", 0).on_each(&[TestKind::Add, TestKind::Sub], |n, _| n + 1);

        let n = slice.reduce(&0, &TestAction::Add(100));
        let n = slice.reduce(&n, &TestAction::Sub(100));
        let n = slice.reduce(&n, &TestAction::Rename("ignored".into()));
        assert_eq!(n, 2);

        let mut kinds = slice.handled_kinds();
        kinds.sort_by_key(|kind| format!("{kind:?}"));
        assert_eq!(kinds, vec![TestKind::Add, TestKind::Sub]);
    }

    #[test]
    fn test_draft_mutation_does_not_touch_previous() {
        let slice = Slice::<Vec<String>, TestAction>::new("names", vec!["a".to_string()]).on(
            TestKind::Rename,
            |mut names, action| {
                if let TestAction::Rename(name) = action {
                    names.push(name.clone());
                }
                names
            },
        );

        let before = slice.initial_state();
        let after = slice.reduce(&before, &TestAction::Rename("b".into()));

        assert_eq!(before, vec!["a".to_string()]);
        assert_eq!(after, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(slice.name(), "names");
    }
}
