//! Todo demo.
//!
//! With stdin piped, reads one JSON command per line, dispatches each and
//! prints the final state as JSON:
//!
//! ```text
//! echo '{"type":"create","desc":"Learn Systems Design"}' | cargo run -p todo
//! ```
//!
//! Otherwise walks through a short scenario on both reducer flavours.
//!
//! Environment: `TODUX_FLAVOR` (`classic`/`sliced`), `TODUX_ENV`,
//! `TODUX_LOGGER`, `TODUX_DEVTOOLS_HISTORY`, `RUST_LOG`.

use anyhow::Context;
use std::io::IsTerminal;
use todo::{
    apply_commands, configure_store, delete_todo, toggle_todo, Flavor, TodoEnvironment, TodoState,
};
use todux_runtime::StoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info,todux_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    todux_runtime::metrics::describe_metrics();

    let config = StoreConfig::from_env().context("Invalid store configuration")?;
    let env = TodoEnvironment::production();

    if std::io::stdin().is_terminal() {
        for flavor in Flavor::ALL {
            run_scenario(flavor, &env, &config);
        }
        Ok(())
    } else {
        let flavor = Flavor::from_env()?;
        run_commands(flavor, &env, &config)
    }
}

/// Dispatches the commands read from stdin and prints the final state
fn run_commands(flavor: Flavor, env: &TodoEnvironment, config: &StoreConfig) -> anyhow::Result<()> {
    let mut store = configure_store(flavor, env, config);
    let rejected = apply_commands(&mut store, env, std::io::stdin().lock())
        .context("Failed to read stdin")?;

    tracing::info!(
        dispatched = store.dispatch_count(),
        rejected,
        "Finished reading commands"
    );

    let json = serde_json::to_string_pretty(store.get_state())?;
    println!("{json}");
    Ok(())
}

/// Create, toggle and delete a todo, printing each step
fn run_scenario(flavor: Flavor, env: &TodoEnvironment, config: &StoreConfig) {
    println!("=== {flavor} reducers ===\n");

    let mut store = configure_store(flavor, env, config);
    let _subscription = store.subscribe(|state: &TodoState| {
        tracing::debug!(counter = state.counter, "State changed");
    });
    print_state("Seed", store.get_state());

    store.dispatch(env.create_todo("Learn Systems Design"));
    print_state("After create", store.get_state());

    let id = store.state(|s| s.todos.last().map(|todo| todo.id.clone()));

    if let Some(id) = id {
        store.dispatch(toggle_todo(id.clone(), true));
        print_state("After toggle", store.get_state());

        store.dispatch(delete_todo(id));
        print_state("After delete", store.get_state());
    }

    if let Some(devtools) = store.devtools() {
        println!("History: {}\n", devtools.action_types().join(" -> "));
    }
}

fn print_state(label: &str, state: &TodoState) {
    println!("{label} (counter = {}):", state.counter);
    for todo in &state.todos {
        let status = if todo.is_complete { "✓" } else { " " };
        println!("  [{status}] {}", todo.desc);
    }
    println!();
}
