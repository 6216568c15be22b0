//! Property tests for the state-transition rules, on both reducer flavours.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use todo::{
    create_todo, delete_todo, edit_todo, select_todo, toggle_todo, Flavor, TodoAction, TodoId,
    TodoReducer, TodoState,
};
use todux_core::reducer::Reducer;
use todux_testing::properties::description;
use todux_testing::SequentialIdGenerator;

/// An action whose target is picked relative to the state it is applied to
#[derive(Clone, Debug)]
enum Step {
    Create(String),
    Edit(usize, String),
    Toggle(usize, bool),
    Delete(usize),
    Select(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        description().prop_map(Step::Create),
        (any::<usize>(), description()).prop_map(|(n, desc)| Step::Edit(n, desc)),
        (any::<usize>(), any::<bool>()).prop_map(|(n, flag)| Step::Toggle(n, flag)),
        any::<usize>().prop_map(Step::Delete),
        any::<usize>().prop_map(Step::Select),
    ]
}

/// Existing id, or an unknown one when `n` lands one past the end
fn target(state: &TodoState, n: usize) -> TodoId {
    let slot = n % (state.todos.len() + 1);
    state
        .todos
        .get(slot)
        .map_or_else(|| TodoId::from("missing"), |todo| todo.id.clone())
}

fn to_action(step: &Step, state: &TodoState, ids: &SequentialIdGenerator) -> TodoAction {
    match step {
        Step::Create(desc) => create_todo(desc.clone(), ids),
        Step::Edit(n, desc) => edit_todo(target(state, *n), desc.clone()),
        Step::Toggle(n, flag) => toggle_todo(target(state, *n), *flag),
        Step::Delete(n) => delete_todo(target(state, *n)),
        Step::Select(n) => select_todo(target(state, *n)),
    }
}

fn reducer(flavor: Flavor) -> TodoReducer {
    flavor.root_reducer(todo::seed_todos(&SequentialIdGenerator::with_prefix("seed")))
}

/// Runs `steps` from the seed and returns the state before the last step,
/// the last action and the state after it
fn run(flavor: Flavor, steps: &[Step]) -> (TodoState, TodoAction, TodoState) {
    let root = reducer(flavor);
    let ids = SequentialIdGenerator::new();
    let mut state = root.initial_state();
    let mut last = None;

    for step in steps {
        let action = to_action(step, &state, &ids);
        let next = root.reduce(&state, &action);
        last = Some((state, action));
        state = next;
    }

    match last {
        Some((before, action)) => (before, action, state),
        None => {
            let action = select_todo("missing");
            let next = root.reduce(&state, &action);
            (state, action, next)
        }
    }
}

proptest! {
    #[test]
    fn flavours_agree(steps in prop::collection::vec(step(), 0..40)) {
        let classic = reducer(Flavor::Classic);
        let sliced = reducer(Flavor::Sliced);
        let ids = SequentialIdGenerator::new();

        let mut left = classic.initial_state();
        let mut right = sliced.initial_state();
        prop_assert_eq!(&left, &right);

        for step in &steps {
            let action = to_action(step, &left, &ids);
            left = classic.reduce(&left, &action);
            right = sliced.reduce(&right, &action);
            prop_assert_eq!(&left, &right);
        }
    }

    #[test]
    fn ids_stay_unique(steps in prop::collection::vec(step(), 0..40)) {
        for flavor in Flavor::ALL {
            let (_, _, state) = run(flavor, &steps);
            let mut ids: Vec<_> = state.todos.iter().map(|todo| todo.id.clone()).collect();
            let len = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);
        }
    }

    #[test]
    fn transitions_follow_the_rules(steps in prop::collection::vec(step(), 1..30)) {
        for flavor in Flavor::ALL {
            let (before, action, after) = run(flavor, &steps);

            match &action {
                TodoAction::SelectTodo { id } => {
                    prop_assert_eq!(&after.todos, &before.todos);
                    prop_assert_eq!(after.counter, before.counter);
                    prop_assert_eq!(after.selected_todo.as_ref(), Some(id));
                }
                TodoAction::CreateTodo(todo) => {
                    prop_assert_eq!(after.count(), before.count() + 1);
                    prop_assert!(!before.exists(&todo.id));
                    let appended = after.todos.last();
                    prop_assert_eq!(appended.map(|t| &t.desc), Some(&todo.desc));
                    prop_assert_eq!(appended.map(|t| t.is_complete), Some(false));
                    prop_assert_eq!(after.counter, before.counter + 1);
                }
                TodoAction::EditTodo { id, desc } => {
                    prop_assert_eq!(after.counter, before.counter + 1);
                    if before.exists(id) {
                        prop_assert_eq!(after.count(), before.count());
                        for (old, new) in before.todos.iter().zip(&after.todos) {
                            prop_assert_eq!(&new.id, &old.id);
                            prop_assert_eq!(new.is_complete, old.is_complete);
                            if &old.id == id {
                                prop_assert_eq!(&new.desc, desc);
                            } else {
                                prop_assert_eq!(&new.desc, &old.desc);
                            }
                        }
                    } else {
                        prop_assert_eq!(&after.todos, &before.todos);
                    }
                }
                TodoAction::ToggleTodo { id, is_complete } => {
                    prop_assert_eq!(after.counter, before.counter + 1);
                    if before.exists(id) {
                        prop_assert_eq!(after.count(), before.count());
                        for (old, new) in before.todos.iter().zip(&after.todos) {
                            prop_assert_eq!(&new.id, &old.id);
                            prop_assert_eq!(&new.desc, &old.desc);
                            if &old.id == id {
                                prop_assert_eq!(new.is_complete, *is_complete);
                            } else {
                                prop_assert_eq!(new.is_complete, old.is_complete);
                            }
                        }
                    } else {
                        prop_assert_eq!(&after.todos, &before.todos);
                    }
                }
                TodoAction::DeleteTodo { id } => {
                    prop_assert_eq!(after.counter, before.counter + 1);
                    if before.exists(id) {
                        prop_assert_eq!(after.count(), before.count() - 1);
                        prop_assert!(!after.exists(id));
                    } else {
                        prop_assert_eq!(&after.todos, &before.todos);
                    }
                }
            }

            prop_assert!(after.counter >= before.counter);
        }
    }

    #[test]
    fn toggling_twice_converges(
        steps in prop::collection::vec(step(), 0..20),
        n in any::<usize>(),
        flag in any::<bool>(),
    ) {
        for flavor in Flavor::ALL {
            let root = reducer(flavor);
            let (_, _, state) = run(flavor, &steps);
            let action = toggle_todo(target(&state, n), flag);

            let once = root.reduce(&state, &action);
            let twice = root.reduce(&once, &action);

            prop_assert_eq!(&twice.todos, &once.todos);
            prop_assert_eq!(twice.counter, state.counter + 2);
        }
    }
}
