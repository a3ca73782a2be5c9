//! Patrol AI State Machine
//!
//! This example demonstrates a guarded machine driving an enemy AI.
//!
//! Key concepts:
//! - Transition tables declared by each state
//! - Deferred transition requests from tick hooks
//! - History tracking with rollback
//! - Delayed continuations through the owner's scheduler
//!
//! Run with: cargo run --example ai_patrol

use impulse::schedule::{ScheduleContext, Scheduler, Task, TickScheduler};
use impulse::{transition_table, State, StateMachineBuilder, TransitionTable};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Guard {
    Patrolling,
    Chasing,
    Searching,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Sense {
    SpottedPlayer,
    LostPlayer,
    GaveUp,
}

struct Enemy {
    player_visible: bool,
    scheduler: TickScheduler,
    search_expired: Rc<Cell<bool>>,
}

impl ScheduleContext for Enemy {
    fn scheduler(&mut self) -> &mut dyn Scheduler {
        &mut self.scheduler
    }
}

struct Patrolling;

impl State<Enemy, Guard, Sense> for Patrolling {
    fn id(&self) -> Guard {
        Guard::Patrolling
    }

    fn transitions(&self, table: &mut TransitionTable<Guard, Sense>) {
        transition_table!(table, {
            Sense::SpottedPlayer => Guard::Chasing,
        });
    }

    fn enter(&mut self, _owner: &mut Enemy) {
        println!("  [patrolling] back on the route");
    }

    fn update(&mut self, owner: &mut Enemy, _dt: f32) -> Option<Sense> {
        owner.player_visible.then_some(Sense::SpottedPlayer)
    }

    fn fixed_update(&mut self, _owner: &mut Enemy, _dt: f32) -> Option<Sense> {
        None
    }
}

struct Chasing;

impl State<Enemy, Guard, Sense> for Chasing {
    fn id(&self) -> Guard {
        Guard::Chasing
    }

    fn transitions(&self, table: &mut TransitionTable<Guard, Sense>) {
        transition_table!(table, {
            Sense::LostPlayer => Guard::Searching,
        });
    }

    fn enter(&mut self, _owner: &mut Enemy) {
        println!("  [chasing] target acquired!");
    }

    fn update(&mut self, owner: &mut Enemy, _dt: f32) -> Option<Sense> {
        (!owner.player_visible).then_some(Sense::LostPlayer)
    }

    fn fixed_update(&mut self, _owner: &mut Enemy, _dt: f32) -> Option<Sense> {
        None
    }
}

/// Searches the player's last known position, giving up after a scheduled
/// timeout unless the player reappears.
struct Searching {
    patience: Option<impulse::schedule::TaskHandle>,
}

impl State<Enemy, Guard, Sense> for Searching {
    fn id(&self) -> Guard {
        Guard::Searching
    }

    fn transitions(&self, table: &mut TransitionTable<Guard, Sense>) {
        transition_table!(table, {
            Sense::SpottedPlayer => Guard::Chasing,
            Sense::GaveUp => Guard::Patrolling,
        });
    }

    fn enter(&mut self, owner: &mut Enemy) {
        println!("  [searching] where did they go?");
        owner.search_expired.set(false);
        let expired = Rc::clone(&owner.search_expired);
        self.patience = Some(
            owner
                .scheduler()
                .start(Task::once(2.0, move || expired.set(true))),
        );
    }

    fn exit(&mut self, owner: &mut Enemy) {
        if let Some(handle) = self.patience.take() {
            owner.scheduler().cancel(handle);
        }
    }

    fn update(&mut self, owner: &mut Enemy, _dt: f32) -> Option<Sense> {
        if owner.player_visible {
            Some(Sense::SpottedPlayer)
        } else if owner.search_expired.get() {
            Some(Sense::GaveUp)
        } else {
            None
        }
    }

    fn fixed_update(&mut self, _owner: &mut Enemy, _dt: f32) -> Option<Sense> {
        None
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Patrol AI State Machine ===\n");

    let mut enemy = Enemy {
        player_visible: false,
        scheduler: TickScheduler::new(),
        search_expired: Rc::new(Cell::new(false)),
    };

    let mut machine = StateMachineBuilder::new()
        .state(Box::new(Patrolling) as Box<dyn State<Enemy, Guard, Sense>>)
        .state(Box::new(Chasing))
        .state(Box::new(Searching { patience: None }))
        .initial(Guard::Patrolling)
        .track_history(true)
        .debug(true)
        .build(&mut enemy)
        .expect("patrol machine configuration is valid");

    let dt = 0.5;
    // Scripted sightings: (second the player appears, second they vanish).
    let visible_between = (2.0, 4.0);

    for step in 0..16 {
        let now = step as f32 * dt;
        enemy.player_visible = now >= visible_between.0 && now < visible_between.1;

        machine.update(&mut enemy, dt);
        enemy.scheduler.advance(dt);

        println!(
            "t={now:4.1}s  state={:<10}  player_visible={}",
            machine.current_state_name().unwrap_or_default(),
            enemy.player_visible
        );
    }

    println!("\nVisited path: {:?}", machine.history().unwrap().path());
    println!("Moves journaled: {}", machine.history().unwrap().records().len());

    machine.shutdown(&mut enemy);
    println!("\n=== Example Complete ===");
}
