//! Game Flow Controller
//!
//! This example demonstrates the direct-jump policy: a screen-flow
//! controller with no transition tables, where every jump is legal.
//!
//! Key concepts:
//! - `TransitionPolicy::Direct` and `change_state`
//! - Entering the first state with a jump instead of an initial-state call
//! - Restarting a state via a self-jump
//!
//! Run with: cargo run --example game_flow

use impulse::builder::passive_state;
use impulse::{StateMachineBuilder, TransitionPolicy};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Screen {
    MainMenu,
    Gameplay,
    GameOver,
}

// The controller never uses triggers; the transition-id type is only here
// to satisfy the machine's shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum NoTrigger {}

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Game Flow Controller ===\n");

    let mut session = ();
    let mut controller = StateMachineBuilder::<(), Screen, NoTrigger>::new()
        .state(passive_state(Screen::MainMenu, vec![]))
        .state(passive_state(Screen::Gameplay, vec![]))
        .state(passive_state(Screen::GameOver, vec![]))
        .policy(TransitionPolicy::Direct)
        .build(&mut session)
        .expect("controller configuration is valid");

    println!("Machine starts off: {:?}", controller.current_state());

    controller.change_state(&mut session, Screen::MainMenu);
    println!("Booted into: {}", controller.current_state_name().unwrap());

    controller.change_state(&mut session, Screen::Gameplay);
    println!("Player pressed start: {}", controller.current_state_name().unwrap());

    // Level restart is a self-jump: the screen exits and re-enters.
    controller.change_state(&mut session, Screen::Gameplay);
    println!("Level restarted: {}", controller.current_state_name().unwrap());

    controller.change_state(&mut session, Screen::GameOver);
    controller.change_state(&mut session, Screen::MainMenu);
    println!("Back to: {}", controller.current_state_name().unwrap());

    println!("\nDirect jumps skip transition tables entirely; the guarded");
    println!("policy would have rejected every one of these.");

    controller.shutdown(&mut session);
    println!("\n=== Example Complete ===");
}
