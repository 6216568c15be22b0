//! Metric names and descriptions for the Store runtime.
//!
//! The runtime records through the `metrics` facade only. Installing an
//! exporter (Prometheus, statsd, ...) is left to the application; without
//! one every recording is a no-op.
//!
//! # Example
//!
//! ```
//! use todux_runtime::metrics::{describe_metrics, DISPATCH_TOTAL};
//!
//! // Once, after the application installed its recorder
//! describe_metrics();
//! assert_eq!(DISPATCH_TOTAL, "store.dispatch.total");
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Counter of dispatched actions, labelled with `action` (the action type)
pub const DISPATCH_TOTAL: &str = "store.dispatch.total";

/// Histogram of root reducer execution time
pub const REDUCER_DURATION_SECONDS: &str = "store.reducer.duration_seconds";

/// Counter of listener invocations
pub const LISTENERS_NOTIFIED: &str = "store.listeners.notified";

/// Gauge of currently registered listeners
pub const LISTENERS_ACTIVE: &str = "store.listeners.active";

/// Gauge of entries held by the devtools history
pub const DEVTOOLS_HISTORY_SIZE: &str = "store.devtools.history_size";

/// Register all metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!(DISPATCH_TOTAL, "Total number of actions dispatched to the store");
    describe_histogram!(
        REDUCER_DURATION_SECONDS,
        Unit::Seconds,
        "Time taken by the root reducer to compute the next state"
    );
    describe_counter!(
        LISTENERS_NOTIFIED,
        "Total number of listener invocations after dispatch"
    );
    describe_gauge!(LISTENERS_ACTIVE, "Number of registered store listeners");
    describe_gauge!(
        DEVTOOLS_HISTORY_SIZE,
        "Number of entries held by the devtools history"
    );
}
