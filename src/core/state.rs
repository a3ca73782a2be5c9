//! The `State` behavior trait and physics-contact forwarding types.
//!
//! A state is a unit of behavior bound to one state id. The machine calls
//! its lifecycle hooks on activation, deactivation, and every tick; hooks
//! receive the owner context `&mut C` and may request a transition by
//! returning a transition id, which the machine executes after the hook
//! returns. States never hold a reference to their machine - the deferred
//! request is what keeps transitions from re-entering a swap in progress.

use std::any::Any;

use super::key::{StateKey, TransitionKey};
use super::table::TransitionTable;

/// Phase of a physics callback being forwarded through the machine.
///
/// The machine does not interpret these; it hands them to the current state
/// verbatim.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContactKind {
    TriggerEnter,
    TriggerStay,
    TriggerExit,
    CollisionEnter,
    CollisionStay,
    CollisionExit,
}

/// A physics callback forwarded to the current state.
///
/// The payload is whatever the host's physics layer produced, passed through
/// unexamined; states that care downcast it to the concrete type they expect.
///
/// ```rust
/// use impulse::{ContactEvent, ContactKind};
///
/// struct Hit { other: u32 }
///
/// let hit = Hit { other: 7 };
/// let event = ContactEvent::new(ContactKind::CollisionEnter, &hit);
/// assert_eq!(event.payload::<Hit>().map(|h| h.other), Some(7));
/// assert!(event.payload::<String>().is_none());
/// ```
#[derive(Clone, Copy)]
pub struct ContactEvent<'a> {
    kind: ContactKind,
    payload: &'a dyn Any,
}

impl<'a> ContactEvent<'a> {
    /// Wrap a host payload for forwarding.
    pub fn new(kind: ContactKind, payload: &'a dyn Any) -> Self {
        Self { kind, payload }
    }

    /// The callback phase.
    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    /// Downcast the opaque payload to a concrete type.
    pub fn payload<P: Any>(&self) -> Option<&'a P> {
        self.payload.downcast_ref::<P>()
    }
}

impl std::fmt::Debug for ContactEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactEvent")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A unit of behavior bound to one state id.
///
/// Generic over the owner context `C` (the entity or controller the machine
/// drives), the state-id type `S`, and the transition-id type `T`.
///
/// Lifecycle: [`register`](Self::register) runs exactly once when the state
/// is added to a machine, followed by one [`transitions`](Self::transitions)
/// call to declare outgoing edges. After that, [`enter`](Self::enter) and
/// [`exit`](Self::exit) bracket every activation, and the tick hooks run
/// while the state is current.
///
/// # Requesting transitions
///
/// [`update`](Self::update), [`fixed_update`](Self::fixed_update), and
/// [`contact`](Self::contact) return `Option<T>`: `Some(trigger)` asks the
/// machine to run that transition once the hook is done. `enter`/`exit`
/// cannot request moves - a cascade mid-swap would break the strict
/// exit-before-enter ordering.
///
/// # Delayed work
///
/// States that need a delayed continuation forward the request to their
/// owner's scheduler (see [`crate::schedule`]); the state keeps only the
/// returned handle and is responsible for cancelling it in `exit` if the
/// work must not outlive the activation.
///
/// # Example
///
/// ```rust
/// use impulse::{State, TransitionTable};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Ai { Idle, Chasing }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Trigger { Spotted, Lost }
///
/// struct Sensors { player_visible: bool }
///
/// struct Idle;
///
/// impl State<Sensors, Ai, Trigger> for Idle {
///     fn id(&self) -> Ai {
///         Ai::Idle
///     }
///
///     fn transitions(&self, table: &mut TransitionTable<Ai, Trigger>) {
///         table.add(Trigger::Spotted, Ai::Chasing, true);
///     }
///
///     fn update(&mut self, owner: &mut Sensors, _dt: f32) -> Option<Trigger> {
///         owner.player_visible.then_some(Trigger::Spotted)
///     }
///
///     fn fixed_update(&mut self, _owner: &mut Sensors, _dt: f32) -> Option<Trigger> {
///         None
///     }
/// }
/// ```
pub trait State<C, S: StateKey, T: TransitionKey> {
    /// The id this state occupies in the catalog.
    fn id(&self) -> S;

    /// One-time initialization, run when the state is added to a machine and
    /// before its transition table is built.
    fn register(&mut self, _owner: &mut C) {}

    /// Declare outgoing edges. Called once, after [`register`](Self::register).
    ///
    /// The default leaves the table empty, which suits direct-jump
    /// controllers and terminal states.
    fn transitions(&self, _table: &mut TransitionTable<S, T>) {}

    /// Called when this state becomes current.
    fn enter(&mut self, _owner: &mut C) {}

    /// Called when this state stops being current. Runs to completion before
    /// the incoming state's `enter` begins.
    fn exit(&mut self, _owner: &mut C) {}

    /// Per-frame tick. Return `Some(trigger)` to request a transition.
    fn update(&mut self, owner: &mut C, dt: f32) -> Option<T>;

    /// Per-physics-step tick. Return `Some(trigger)` to request a transition.
    fn fixed_update(&mut self, owner: &mut C, dt: f32) -> Option<T>;

    /// Physics callback forwarded from the host. Default ignores it.
    fn contact(&mut self, _owner: &mut C, _event: ContactEvent<'_>) -> Option<T> {
        None
    }
}
