//! # Todux Testing
//!
//! Testing utilities and helpers for the Todux state container.
//!
//! This crate provides:
//! - Deterministic implementations of environment traits
//! - A Given-When-Then harness for reducers
//! - Property-based testing strategies
//! - A recorder capturing store notifications
//!
//! ## Example
//!
//! ```ignore
//! use todux_testing::{test_ids, StateRecorder};
//! use todux_runtime::Store;
//!
//! #[test]
//! fn test_create_notifies() {
//!     let env = TodoEnvironment::new(test_ids());
//!     let mut store = Store::new(root_reducer(env.seed()));
//!     let recorder = StateRecorder::new();
//!     let _subscription = store.subscribe(recorder.listener());
//!
//!     store.dispatch(env.create_todo("Write tests"));
//!
//!     assert_eq!(recorder.count(), 1);
//! }
//! ```

use std::sync::Arc;


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations for testing.
pub mod mocks {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};
    use todux_core::environment::IdGenerator;

    /// Sequential id generator for deterministic tests
    ///
    /// Produces `todo-1`, `todo-2`, ... in call order.
    ///
    /// # Example
    ///
    /// ```
    /// use todux_testing::mocks::SequentialIdGenerator;
    /// use todux_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.generate(), "todo-1");
    /// assert_eq!(ids.generate(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: &'static str,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator producing `todo-N`
        #[must_use]
        pub const fn new() -> Self {
            Self::with_prefix("todo")
        }

        /// Create a generator producing `<prefix>-N`
        #[must_use]
        pub const fn with_prefix(prefix: &'static str) -> Self {
            Self {
                prefix,
                next: AtomicU64::new(1),
            }
        }

        /// Number of ids generated so far
        #[must_use]
        pub fn generated(&self) -> u64 {
            self.next.load(Ordering::SeqCst).saturating_sub(1)
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{n}", self.prefix)
        }
    }

    /// Shared sequential id generator starting at `todo-1`
    #[must_use]
    pub fn test_ids() -> Arc<SequentialIdGenerator> {
        Arc::new(SequentialIdGenerator::new())
    }

    /// Captures every state a store notifies its listeners with
    ///
    /// Clones share the same recording.
    #[derive(Debug)]
    pub struct StateRecorder<S> {
        states: Arc<Mutex<Vec<S>>>,
    }

    impl<S> Clone for StateRecorder<S> {
        fn clone(&self) -> Self {
            Self {
                states: Arc::clone(&self.states),
            }
        }
    }

    impl<S> Default for StateRecorder<S> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<S> StateRecorder<S> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                states: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Number of recorded notifications
        #[must_use]
        pub fn count(&self) -> usize {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Inspect the recorded states, oldest first
        pub fn with_states<T>(&self, f: impl FnOnce(&[S]) -> T) -> T {
            f(&self.states.lock().unwrap_or_else(PoisonError::into_inner))
        }
    }

    impl<S: Clone + Send + 'static> StateRecorder<S> {
        /// A listener to pass to `Store::subscribe`
        pub fn listener(&self) -> impl Fn(&S) + Send + Sync + 'static {
            let states = Arc::clone(&self.states);
            move |state: &S| {
                states
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(state.clone());
            }
        }

        /// The most recent recorded state
        #[must_use]
        pub fn last(&self) -> Option<S> {
            self.states
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Todo descriptions, including empty and non-ASCII text
    pub fn description() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-zA-Z ]{1,24}",
            "\\PC{1,12}",
        ]
    }
}

/// Install a `tracing` subscriber writing to the test output
///
/// Respects `RUST_LOG`; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{test_ids, SequentialIdGenerator, StateRecorder};

/// Shared id generator as the trait object environments expect
#[must_use]
pub fn shared_test_ids() -> Arc<dyn todux_core::environment::IdGenerator> {
    test_ids()
}
