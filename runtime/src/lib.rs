//! # Todux Runtime
//!
//! Runtime implementation for the Todux state container.
//!
//! This crate provides the Store that owns the current state, runs the root
//! reducer for every dispatched action and notifies subscribers.
//!
//! ## Core Components
//!
//! - **Store**: Holds the state, dispatches actions, notifies listeners
//! - **Middleware**: Ordered hooks around each dispatch (logger, devtools)
//! - **Configuration**: Environment-driven toggles for the middleware
//!
//! ## Example
//!
//! ```ignore
//! use todux_runtime::Store;
//!
//! let mut store = Store::new(root_reducer(seed));
//!
//! let subscription = store.subscribe(|state| println!("{state:?}"));
//!
//! // Dispatch an action
//! store.dispatch(TodoAction::DeleteTodo { id });
//!
//! // Read state
//! let count = store.state(|s| s.todos.len());
//! subscription.unsubscribe();
//! ```

/// Metric names for observability
pub mod metrics;

/// Middleware hooks, logger and devtools
pub mod middleware;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors raised while reading the store configuration
    ///
    /// Dispatching never fails; configuration is the only fallible part of
    /// the runtime.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum ConfigError {
        /// A boolean toggle had a value other than `0/1/true/false/on/off`
        #[error("Invalid value for {key}: {value:?} (expected 0/1, true/false or on/off)")]
        InvalidFlag {
            /// Environment key that was read
            key: &'static str,
            /// The rejected value
            value: String,
        },

        /// The devtools history limit was not a positive integer
        #[error("Invalid devtools history limit: {value:?} (expected a positive integer)")]
        InvalidHistoryLimit {
            /// The rejected value
            value: String,
        },
    }
}

pub use error::ConfigError;
pub use middleware::{DevTools, DevToolsHandle, HistoryEntry, LoggerMiddleware, Middleware};
pub use store::{Store, Subscription};

/// Environment key selecting the deployment environment
pub const ENV_KEY: &str = "TODUX_ENV";

/// Environment key toggling the logger middleware
pub const LOGGER_KEY: &str = "TODUX_LOGGER";

/// Environment key setting the devtools history limit
pub const DEVTOOLS_HISTORY_KEY: &str = "TODUX_DEVTOOLS_HISTORY";

/// Default number of entries kept by the devtools history
pub const DEFAULT_DEVTOOLS_HISTORY: usize = 50;

/// Configuration for Store instances
///
/// Selects which middleware [`Store::with_config`] installs. Configuration
/// never influences how state is computed.
///
/// # Example
///
/// ```
/// use todux_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_logger(false)
///     .with_devtools(true)
///     .with_devtools_history_limit(10);
///
/// assert!(config.devtools);
/// assert_eq!(config.devtools_history_limit, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Install the [`LoggerMiddleware`]
    pub logger: bool,
    /// Install the [`DevTools`] middleware
    pub devtools: bool,
    /// Maximum number of entries kept by the devtools history
    pub devtools_history_limit: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(logger: bool, devtools: bool, devtools_history_limit: usize) -> Self {
        Self {
            logger,
            devtools,
            devtools_history_limit,
        }
    }

    /// Enable or disable the logger middleware
    #[must_use]
    pub const fn with_logger(mut self, enabled: bool) -> Self {
        self.logger = enabled;
        self
    }

    /// Enable or disable the devtools middleware
    #[must_use]
    pub const fn with_devtools(mut self, enabled: bool) -> Self {
        self.devtools = enabled;
        self
    }

    /// Set the devtools history limit
    #[must_use]
    pub const fn with_devtools_history_limit(mut self, limit: usize) -> Self {
        self.devtools_history_limit = limit;
        self
    }

    /// Read the configuration from the process environment
    ///
    /// See [`StoreConfig::from_lookup`] for the recognised keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a key holds an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from a key lookup
    ///
    /// Starts from [`StoreConfig::default`] and applies:
    /// - `TODUX_ENV`: `production` disables devtools, any other value enables them.
    ///   The logger stays installed in every environment.
    /// - `TODUX_LOGGER`: `0/false/off` or `1/true/on` (case-insensitive)
    /// - `TODUX_DEVTOOLS_HISTORY`: a positive integer
    ///
    /// Missing keys keep their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a key holds an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(env) = lookup(ENV_KEY) {
            config.devtools = !env.trim().eq_ignore_ascii_case("production");
        }

        if let Some(value) = lookup(LOGGER_KEY) {
            config.logger = parse_flag(LOGGER_KEY, &value)?;
        }

        if let Some(value) = lookup(DEVTOOLS_HISTORY_KEY) {
            config.devtools_history_limit = match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(ConfigError::InvalidHistoryLimit { value }),
            };
        }

        tracing::debug!(?config, "Loaded store configuration");
        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            logger: true,
            devtools: cfg!(debug_assertions),
            devtools_history_limit: DEFAULT_DEVTOOLS_HISTORY,
        }
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

/// Store module - the runtime for reducers
pub mod store {
    use super::StoreConfig;
    use crate::metrics;
    use crate::middleware::{DevTools, DevToolsHandle, LoggerMiddleware, Middleware};
    use std::fmt::Debug;
    use std::sync::{Arc, Mutex, PoisonError, Weak};
    use std::time::Instant;
    use todux_core::action::Action;
    use todux_core::reducer::Reducer;

    type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

    /// Registered listeners in subscription order
    struct Listeners<S> {
        next_id: u64,
        entries: Vec<(u64, Listener<S>)>,
    }

    impl<S> Listeners<S> {
        const fn new() -> Self {
            Self {
                next_id: 0,
                entries: Vec::new(),
            }
        }
    }

    type Registry<S> = Arc<Mutex<Listeners<S>>>;

    /// The Store - owner of the single state tree
    ///
    /// The Store manages:
    /// 1. State (exclusively owned, replaced on every dispatch)
    /// 2. Reducer (the root reducer computing the next state)
    /// 3. Listeners (notified synchronously after each dispatch)
    /// 4. Middleware (hooks around each dispatch)
    ///
    /// `dispatch` takes `&mut self`, so dispatches are serialized and never
    /// interleave.
    ///
    /// # Type Parameters
    ///
    /// - `R`: The root reducer; its `State` and `Action` are the store's
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut store = Store::new(root_reducer(seed));
    ///
    /// store.dispatch(TodoAction::SelectTodo { id });
    /// assert_eq!(store.get_state().selected_todo, Some(id));
    /// ```
    pub struct Store<R>
    where
        R: Reducer,
    {
        reducer: R,
        state: R::State,
        listeners: Registry<R::State>,
        middleware: Vec<Box<dyn Middleware<R::State, R::Action> + Send>>,
        devtools: Option<DevToolsHandle<R::State, R::Action>>,
        dispatch_count: u64,
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action + Debug,
        R::State: Debug,
    {
        /// Create a store seeded with the reducer's initial state
        #[must_use]
        pub fn new(reducer: R) -> Self {
            let state = reducer.initial_state();
            Self::with_state(reducer, state)
        }

        /// Create a store with a preloaded state
        #[must_use]
        pub fn with_state(reducer: R, state: R::State) -> Self {
            tracing::debug!("Creating store");
            Self {
                reducer,
                state,
                listeners: Arc::new(Mutex::new(Listeners::new())),
                middleware: Vec::new(),
                devtools: None,
                dispatch_count: 0,
            }
        }

        /// Dispatch an action
        ///
        /// 1. Middleware `before_dispatch` hooks, in registration order
        /// 2. The root reducer computes the next state
        /// 3. The current state is replaced
        /// 4. Every listener is called with the new state
        /// 5. Middleware `after_dispatch` hooks, in registration order
        ///
        /// Listeners registered or removed while this runs take effect on
        /// the next dispatch.
        #[tracing::instrument(skip_all, name = "store_dispatch")]
        pub fn dispatch(&mut self, action: R::Action) {
            let mut action = action;
            for middleware in &mut self.middleware {
                action = middleware.before_dispatch(action, &self.state);
            }

            let action_type = action.action_type();
            tracing::trace!(action_type, "Dispatching action");

            let start = Instant::now();
            let next = {
                let _span = tracing::debug_span!("reducer", action_type).entered();
                self.reducer.reduce(&self.state, &action)
            };
            metrics::histogram!(metrics::REDUCER_DURATION_SECONDS)
                .record(start.elapsed().as_secs_f64());

            let previous = std::mem::replace(&mut self.state, next);
            self.dispatch_count += 1;

            let notified = self.notify();

            for middleware in &mut self.middleware {
                middleware.after_dispatch(&action, &previous, &self.state);
            }

            metrics::counter!(metrics::DISPATCH_TOTAL, "action" => action_type).increment(1);
            tracing::debug!(action_type, notified, "Action dispatched");
        }

        fn notify(&self) -> usize {
            let snapshot: Vec<Listener<R::State>> = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();

            for listener in &snapshot {
                listener(&self.state);
            }

            metrics::counter!(metrics::LISTENERS_NOTIFIED).increment(snapshot.len() as u64);
            snapshot.len()
        }

        /// Read-only view of the current state
        #[must_use]
        pub const fn get_state(&self) -> &R::State {
            &self.state
        }

        /// Read a value derived from the current state
        ///
        /// # Example
        ///
        /// ```ignore
        /// let open = store.state(|s| s.todos.iter().filter(|t| !t.is_complete).count());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            f(&self.state)
        }

        /// Register a listener called with the new state after every dispatch
        ///
        /// Listeners are called in subscription order. Dropping the returned
        /// [`Subscription`] keeps the listener registered; call
        /// [`Subscription::unsubscribe`] to remove it.
        pub fn subscribe<F>(&self, listener: F) -> Subscription<R::State>
        where
            F: Fn(&R::State) + Send + Sync + 'static,
        {
            let mut listeners = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Arc::new(listener)));

            // Precision loss acceptable for metrics
            #[allow(clippy::cast_precision_loss)]
            metrics::gauge!(metrics::LISTENERS_ACTIVE).set(listeners.entries.len() as f64);
            tracing::trace!(listener_id = id, "Listener subscribed");

            Subscription {
                registry: Arc::downgrade(&self.listeners),
                id,
            }
        }

        /// Number of registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .len()
        }

        /// Append a middleware to the chain
        pub fn add_middleware<M>(&mut self, middleware: M)
        where
            M: Middleware<R::State, R::Action> + Send + 'static,
        {
            self.middleware.push(Box::new(middleware));
        }

        /// Number of middleware in the chain
        #[must_use]
        pub fn middleware_count(&self) -> usize {
            self.middleware.len()
        }

        /// Number of completed dispatches
        #[must_use]
        pub const fn dispatch_count(&self) -> u64 {
            self.dispatch_count
        }

        /// The root reducer
        #[must_use]
        pub const fn reducer(&self) -> &R {
            &self.reducer
        }

        /// Handle to the devtools history, if [`Store::with_config`] installed it
        #[must_use]
        pub const fn devtools(&self) -> Option<&DevToolsHandle<R::State, R::Action>> {
            self.devtools.as_ref()
        }
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action + Clone + Debug + Send + 'static,
        R::State: Clone + Debug + Send + 'static,
    {
        /// Create a store seeded with the reducer's initial state and the
        /// middleware selected by `config`
        ///
        /// The logger is installed before the devtools.
        #[must_use]
        pub fn with_config(reducer: R, config: &StoreConfig) -> Self {
            let mut store = Self::new(reducer);

            if config.logger {
                store.add_middleware(LoggerMiddleware::new());
            }

            if config.devtools {
                let devtools = DevTools::new(config.devtools_history_limit);
                store.devtools = Some(devtools.handle());
                store.add_middleware(devtools);
            }

            tracing::info!(
                logger = config.logger,
                devtools = config.devtools,
                "Store configured"
            );
            store
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("middleware", &self.middleware.len())
                .field("dispatch_count", &self.dispatch_count)
                .finish_non_exhaustive()
        }
    }

    /// Handle to a registered listener
    ///
    /// Returned by [`Store::subscribe`]. Outliving the store is harmless.
    pub struct Subscription<S> {
        registry: Weak<Mutex<Listeners<S>>>,
        id: u64,
    }

    impl<S> Subscription<S> {
        /// Remove the listener
        ///
        /// Returns `false` if the store is gone or the listener was already
        /// removed.
        pub fn unsubscribe(self) -> bool {
            let Some(registry) = self.registry.upgrade() else {
                return false;
            };

            let mut listeners = registry.lock().unwrap_or_else(PoisonError::into_inner);
            let before = listeners.entries.len();
            listeners.entries.retain(|(id, _)| *id != self.id);
            let removed = listeners.entries.len() < before;

            // Precision loss acceptable for metrics
            #[allow(clippy::cast_precision_loss)]
            metrics::gauge!(metrics::LISTENERS_ACTIVE).set(listeners.entries.len() as f64);
            tracing::trace!(listener_id = self.id, removed, "Listener unsubscribed");
            removed
        }

        /// Whether the listener is still registered
        #[must_use]
        pub fn is_active(&self) -> bool {
            self.registry.upgrade().is_some_and(|registry| {
                registry
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entries
                    .iter()
                    .any(|(id, _)| *id == self.id)
            })
        }
    }

    impl<S> std::fmt::Debug for Subscription<S> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Subscription")
                .field("id", &self.id)
                .finish_non_exhaustive()
        }
    }

    #[cfg(test)]
    #[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
    mod tests {
        use super::*;

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        enum TallyKind {
            Add,
            Reset,
        }

        #[derive(Clone, Debug, PartialEq)]
        enum TallyAction {
            Add(u32),
            Reset,
        }

        impl Action for TallyAction {
            type Kind = TallyKind;

            fn kind(&self) -> TallyKind {
                match self {
                    Self::Add(_) => TallyKind::Add,
                    Self::Reset => TallyKind::Reset,
                }
            }

            fn action_type(&self) -> &'static str {
                match self {
                    Self::Add(_) => "tally/add",
                    Self::Reset => "tally/reset",
                }
            }
        }

        struct TallyReducer;

        impl Reducer for TallyReducer {
            type State = u32;
            type Action = TallyAction;

            fn initial_state(&self) -> u32 {
                0
            }

            fn reduce(&self, state: &u32, action: &TallyAction) -> u32 {
                match action {
                    TallyAction::Add(n) => state + n,
                    TallyAction::Reset => 0,
                }
            }
        }

        #[test]
        fn test_new_store_seeds_initial_state() {
            let store = Store::new(TallyReducer);
            assert_eq!(*store.get_state(), 0);
            assert_eq!(store.dispatch_count(), 0);
        }

        #[test]
        fn test_dispatch_replaces_state() {
            let mut store = Store::with_state(TallyReducer, 5);
            store.dispatch(TallyAction::Add(2));
            assert_eq!(store.state(|s| *s), 7);

            store.dispatch(TallyAction::Reset);
            assert_eq!(*store.get_state(), 0);
            assert_eq!(store.dispatch_count(), 2);
        }

        #[test]
        fn test_listeners_see_new_state() {
            let mut store = Store::new(TallyReducer);
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&seen);
            let _subscription = store.subscribe(move |state| sink.lock().unwrap().push(*state));

            store.dispatch(TallyAction::Add(1));
            store.dispatch(TallyAction::Add(2));

            assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
        }

        #[test]
        fn test_unsubscribe_stops_notifications() {
            let mut store = Store::new(TallyReducer);
            let seen = Arc::new(Mutex::new(0));
            let sink = Arc::clone(&seen);
            let subscription = store.subscribe(move |_| *sink.lock().unwrap() += 1);

            store.dispatch(TallyAction::Add(1));
            assert!(subscription.is_active());
            assert!(subscription.unsubscribe());
            store.dispatch(TallyAction::Add(1));

            assert_eq!(*seen.lock().unwrap(), 1);
            assert_eq!(store.listener_count(), 0);
        }

        #[test]
        fn test_unsubscribe_after_store_dropped() {
            let store = Store::new(TallyReducer);
            let subscription = store.subscribe(|_| {});
            drop(store);
            assert!(!subscription.unsubscribe());
        }
    }
}
