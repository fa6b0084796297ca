//! End-to-end lifecycle scenarios across several nodes.

use habitat::{
    state_enum, NodeBuilder, Snapshot, StateNode, TransitionError, TransitionEvent,
    TransitionOutcome, EXIT,
};
use std::cell::RefCell;
use std::error::Error as _;
use std::rc::Rc;

state_enum! {
    enum Player {
        Machine,
        Idle,
        Running,
        Paused,
        Walking,
        Sprinting,
    }
}

type Log = Rc<RefCell<Vec<String>>>;

fn describe(kind: &str, node: Player, event: &TransitionEvent<Player>) -> String {
    format!(
        "{kind} {node:?} [{} -> {}]",
        event.previous_name().unwrap_or("-"),
        event.next_name().unwrap_or("-")
    )
}

fn traced(label: Player, log: &Log) -> StateNode<Player> {
    let enters = Rc::clone(log);
    let exits = Rc::clone(log);
    NodeBuilder::new()
        .label(label)
        .on_enter(move |event| {
            enters.borrow_mut().push(describe("enter", label, event));
            Ok(())
        })
        .on_exit(move |event| {
            exits.borrow_mut().push(describe("exit", label, event));
            Ok(())
        })
        .build()
        .expect("label is set")
}

#[test]
fn idle_running_walkthrough() {
    let log = Log::default();
    let machine = StateNode::new(Player::Machine);
    let idle = traced(Player::Idle, &log);
    let running = traced(Player::Running, &log);

    machine.transition(Some(&idle)).unwrap();
    assert_eq!(machine.child(), Some(idle.clone()));

    machine.transition(Some(&running)).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![
            "enter Idle [- -> Idle]",
            "exit Idle [Idle -> Running]",
            "enter Running [Idle -> Running]",
        ]
    );

    let err = machine.transition(Some(&running)).unwrap_err();
    assert!(err.is_same_state());
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn exit_handler_redirect_wins_over_pending_enter() {
    let log = Log::default();
    let machine = StateNode::new(Player::Machine);
    let idle = traced(Player::Idle, &log);
    let running = traced(Player::Running, &log);
    let paused = traced(Player::Paused, &log);

    machine.transition(Some(&idle)).unwrap();
    log.borrow_mut().clear();

    let parent = machine.downgrade();
    let redirect = paused.clone();
    idle.on_exit(move |event| {
        if event.next_name() == Some("Running") {
            let parent = parent.upgrade().ok_or("machine dropped")?;
            parent.transition(Some(&redirect))?;
        }
        Ok(())
    });

    machine.transition(Some(&running)).unwrap();

    assert!(!log.borrow().iter().any(|line| line.starts_with("enter Running")));
    assert_eq!(machine.child(), Some(paused.clone()));
    assert_eq!(machine.active_path(), vec![Player::Machine, Player::Paused]);

    let history = machine.history();
    let last = history.last().unwrap();
    assert_eq!(last.from, Some(Player::Idle));
    assert_eq!(last.to, Some(Player::Running));
    assert_eq!(last.outcome, TransitionOutcome::Superseded);
}

#[test]
fn exit_handler_may_move_node_into_another_tree() {
    let log = Log::default();
    let machine = StateNode::new(Player::Machine);
    let other = StateNode::new(Player::Machine);
    let idle = traced(Player::Idle, &log);
    let running = traced(Player::Running, &log);

    machine.transition(Some(&idle)).unwrap();

    let target = other.downgrade();
    let leaving = idle.downgrade();
    idle.on_exit(move |_| {
        let target = target.upgrade().ok_or("other dropped")?;
        let leaving = leaving.upgrade().ok_or("idle dropped")?;
        target.transition(Some(&leaving))?;
        Ok(())
    });

    machine.transition(Some(&running)).unwrap();

    assert_eq!(idle.parent(), Some(other.clone()));
    assert_eq!(running.parent(), Some(machine.clone()));
    assert!(log.borrow().contains(&"enter Running [Idle -> Running]".to_string()));
    assert!(log.borrow().contains(&"enter Idle [- -> Idle]".to_string()));
}

#[test]
fn nested_regions_keep_their_own_children() {
    let log = Log::default();
    let machine = StateNode::new(Player::Machine);
    let running = traced(Player::Running, &log);
    let walking = traced(Player::Walking, &log);
    let sprinting = traced(Player::Sprinting, &log);
    let idle = traced(Player::Idle, &log);

    machine.transition(Some(&running)).unwrap();
    running.transition(Some(&walking)).unwrap();
    running.transition(Some(&sprinting)).unwrap();
    assert_eq!(
        machine.active_path(),
        vec![Player::Machine, Player::Running, Player::Sprinting]
    );

    log.borrow_mut().clear();
    machine.transition(Some(&idle)).unwrap();

    // No cascade: the grandchild is neither exited nor unlinked.
    assert_eq!(
        *log.borrow(),
        vec!["exit Running [Running -> Idle]", "enter Idle [Running -> Idle]"]
    );
    assert_eq!(running.child(), Some(sprinting.clone()));
    assert_eq!(sprinting.root(), running);
}

#[test]
fn nested_failure_propagates_out_of_outer_transition() {
    let machine = StateNode::new(Player::Machine);
    let other = StateNode::new(Player::Machine);
    let idle = StateNode::new(Player::Idle);
    let running = StateNode::new(Player::Running);
    let paused = StateNode::new(Player::Paused);

    machine.transition(Some(&idle)).unwrap();
    other.transition(Some(&paused)).unwrap();

    let parent = machine.downgrade();
    let taken = paused.clone();
    idle.on_exit(move |_| {
        let parent = parent.upgrade().ok_or("machine dropped")?;
        parent.transition(Some(&taken))?;
        Ok(())
    });

    let err = machine.transition(Some(&running)).unwrap_err();

    let TransitionError::Handler { event, state, source } = &err else {
        panic!("expected handler error, got {err:?}");
    };
    assert_eq!(event, EXIT);
    assert_eq!(state, "Idle");
    let nested = source
        .downcast_ref::<TransitionError>()
        .expect("nested transition error");
    assert!(nested.is_already_parented());
    assert!(err.source().is_some());

    assert_eq!(machine.child(), Some(running.clone()));
    assert_eq!(paused.parent(), Some(other));
}

#[test]
fn snapshot_reflects_live_tree() {
    let machine = StateNode::new(Player::Machine);
    let running = StateNode::new(Player::Running);
    let walking = StateNode::new(Player::Walking);

    machine.transition(Some(&running)).unwrap();
    running.transition(Some(&walking)).unwrap();

    let json = machine.snapshot().to_json().unwrap();
    let restored = Snapshot::<Player>::from_json(&json).unwrap();

    assert_eq!(
        restored.active_path,
        vec![Player::Machine, Player::Running, Player::Walking]
    );
    assert_eq!(restored.active_leaf(), Some(&Player::Walking));
    assert_eq!(restored.history.get_path(), vec![None, Some(&Player::Running)]);
}
