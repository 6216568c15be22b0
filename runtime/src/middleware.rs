//! Middleware: ordered hooks invoked around every dispatch
//!
//! Middleware is the Store's extension point. Each registered middleware sees
//! every action before the reducer runs (and may replace it) and observes the
//! previous and next state afterwards. Middleware never changes how reducers
//! compute state.
//!
//! Two middlewares ship with the runtime:
//! - [`LoggerMiddleware`]: logs every action with the states around it
//! - [`DevTools`]: keeps an inspectable history of actions and states

use crate::metrics;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use todux_core::action::Action;

/// Observer/transform hook around each dispatch
///
/// Both methods have no-op defaults, so implementors only override what they
/// need.
///
/// # Example
///
/// ```
/// use todux_runtime::middleware::Middleware;
///
/// #[derive(Default)]
/// struct CountingMiddleware {
///     seen: usize,
/// }
///
/// impl<S, A> Middleware<S, A> for CountingMiddleware {
///     fn after_dispatch(&mut self, _action: &A, _previous: &S, _next: &S) {
///         self.seen += 1;
///     }
/// }
/// ```
pub trait Middleware<S, A> {
    /// Called before the reducer runs, in registration order
    ///
    /// Returns the action that continues down the chain. The default passes
    /// it through unchanged.
    fn before_dispatch(&mut self, action: A, _state: &S) -> A {
        action
    }

    /// Called after the state was replaced and listeners were notified,
    /// in registration order
    fn after_dispatch(&mut self, _action: &A, _previous: &S, _next: &S) {}
}

/// Logs each dispatched action and the states around it through `tracing`
///
/// The action type is logged at `INFO`, the previous and next state at
/// `DEBUG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerMiddleware;

impl LoggerMiddleware {
    /// Create a new logger
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for LoggerMiddleware
where
    S: Debug,
    A: Action + Debug,
{
    fn before_dispatch(&mut self, action: A, state: &S) -> A {
        tracing::debug!(prev_state = ?state, "prev state");
        action
    }

    fn after_dispatch(&mut self, action: &A, _previous: &S, next: &S) {
        tracing::info!(action_type = action.action_type(), action = ?action, "action");
        tracing::debug!(next_state = ?next, "next state");
    }
}

/// One recorded dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<S, A> {
    /// 1-based position of the dispatch since the devtools were created
    pub sequence: u64,
    /// Type name of the action
    pub action_type: &'static str,
    /// The action as it reached the reducer
    pub action: A,
    /// The state produced by the action
    pub state: S,
}

type History<S, A> = Arc<Mutex<VecDeque<HistoryEntry<S, A>>>>;

/// Inspection middleware recording a bounded history of dispatches
///
/// Once the history holds `limit` entries the oldest is dropped. Read the
/// history through a [`DevToolsHandle`].
///
/// # Example
///
/// ```ignore
/// let devtools = DevTools::new(50);
/// let handle = devtools.handle();
/// store.add_middleware(devtools);
///
/// store.dispatch(action);
/// assert_eq!(handle.len(), 1);
/// ```
#[derive(Debug)]
pub struct DevTools<S, A> {
    history: History<S, A>,
    limit: usize,
    sequence: u64,
}

impl<S, A> DevTools<S, A> {
    /// Create devtools keeping at most `limit` entries (at least one)
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            history: Arc::new(Mutex::new(VecDeque::new())),
            limit: limit.max(1),
            sequence: 0,
        }
    }

    /// A handle sharing this history
    #[must_use]
    pub fn handle(&self) -> DevToolsHandle<S, A> {
        DevToolsHandle {
            history: Arc::clone(&self.history),
            limit: self.limit,
        }
    }
}

impl<S, A> Middleware<S, A> for DevTools<S, A>
where
    S: Clone,
    A: Action + Clone,
{
    fn after_dispatch(&mut self, action: &A, _previous: &S, next: &S) {
        self.sequence += 1;

        let mut history = self
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if history.len() >= self.limit {
            history.pop_front();
        }

        history.push_back(HistoryEntry {
            sequence: self.sequence,
            action_type: action.action_type(),
            action: action.clone(),
            state: next.clone(),
        });

        // Precision loss acceptable for metrics (history bounded by limit)
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!(metrics::DEVTOOLS_HISTORY_SIZE).set(history.len() as f64);
        tracing::trace!(sequence = self.sequence, "Recorded devtools entry");
    }
}

/// Read access to a [`DevTools`] history
///
/// Cheap to clone; all clones see the same history.
#[derive(Debug)]
pub struct DevToolsHandle<S, A> {
    history: History<S, A>,
    limit: usize,
}

impl<S, A> Clone for DevToolsHandle<S, A> {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
            limit: self.limit,
        }
    }
}

impl<S, A> DevToolsHandle<S, A> {
    /// Number of recorded entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing was recorded (or everything was cleared)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of retained entries
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every recorded entry
    pub fn clear(&self) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Type names of the recorded actions, oldest first
    #[must_use]
    pub fn action_types(&self) -> Vec<&'static str> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| entry.action_type)
            .collect()
    }
}

impl<S: Clone, A: Clone> DevToolsHandle<S, A> {
    /// Snapshot of the recorded entries, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry<S, A>> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// The most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<HistoryEntry<S, A>> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }
}
