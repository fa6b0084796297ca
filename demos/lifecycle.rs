//! Player Lifecycle
//!
//! This example walks a small state tree through attach, replace,
//! redirect and detach, printing each lifecycle event.
//!
//! Key concepts:
//! - Exit runs on the outgoing child, enter on the incoming one
//! - An exit handler may redirect the parent, cancelling the pending enter
//! - The parent's journal records how each transition ended
//!
//! Run with: RUST_LOG=habitat=debug cargo run --example lifecycle

use habitat::{state_enum, NodeBuilder, StateNode, TransitionEvent};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Player {
        Machine,
        Idle,
        Running,
        Paused,
        Stalled,
    }
}

fn announce(kind: &str, event: &TransitionEvent<Player>) {
    println!(
        "  {kind:<5} {:>8} -> {:<8}",
        event.previous_name().unwrap_or("(none)"),
        event.next_name().unwrap_or("(none)")
    );
}

fn state(label: Player) -> StateNode<Player> {
    NodeBuilder::new()
        .label(label)
        .on_enter(|event| {
            announce("enter", event);
            Ok(())
        })
        .on_exit(|event| {
            announce("exit", event);
            Ok(())
        })
        .build()
        .expect("label is set")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Player Lifecycle ===\n");

    let machine = StateNode::new(Player::Machine);
    let idle = state(Player::Idle);
    let running = state(Player::Running);
    let paused = state(Player::Paused);
    let stalled = state(Player::Stalled);

    println!("Attach Idle:");
    machine.transition(Some(&idle))?;

    println!("Idle -> Running:");
    machine.transition(Some(&running))?;

    println!("Running -> Running again:");
    if let Err(err) = machine.transition(Some(&running)) {
        println!("  rejected: {err}");
    }

    // Leaving Running for Stalled is redirected to Paused.
    let parent = machine.downgrade();
    let redirect = paused.clone();
    running.on_exit(move |event| {
        if event.next_name() == Some("Stalled") {
            let parent = parent.upgrade().ok_or("machine dropped")?;
            parent.transition(Some(&redirect))?;
        }
        Ok(())
    });

    println!("Running -> Stalled (redirected):");
    machine.transition(Some(&stalled))?;
    println!("  active path: {:?}", machine.active_path());

    println!("Detach:");
    machine.transition(None)?;

    println!("\nJournal:");
    for record in machine.history().records() {
        println!(
            "  {:?} -> {:?}: {:?}",
            record.from, record.to, record.outcome
        );
    }

    println!("\nSnapshot:\n{}", machine.snapshot().to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
