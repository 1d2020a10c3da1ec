//! # Game Events
//!
//! Payloads published on the game's [`GameEventBus`]. Every handler receives
//! the [`Registry`] as dispatch context.

use kestrel_core::{Entity, Event, EventBus, Registry};

/// Event bus whose handlers are dispatched with the game registry.
pub type GameEventBus = EventBus<Registry>;

/// Keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W.
    W,
    /// A.
    A,
    /// S.
    S,
    /// D.
    D,
    /// B, toggles debug overlays.
    B,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Escape, stops the game.
    Escape,
    /// Space.
    Space,
}

/// Heading selected by a movement key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards negative Y.
    Up,
    /// Towards positive X.
    Right,
    /// Towards positive Y.
    Down,
    /// Towards negative X.
    Left,
}

impl Direction {
    /// Row of the sprite sheet holding the frames for this heading.
    #[must_use]
    pub const fn sheet_row(self) -> u32 {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}

impl KeyCode {
    /// Movement heading bound to this key, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::W | Self::Up => Some(Direction::Up),
            Self::D | Self::Right => Some(Direction::Right),
            Self::S | Self::Down => Some(Direction::Down),
            Self::A | Self::Left => Some(Direction::Left),
            Self::B | Self::Escape | Self::Space => None,
        }
    }
}

/// A key went down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPressedEvent {
    /// The key.
    pub key: KeyCode,
}

impl Event for KeyPressedEvent {}

/// Two colliders overlap this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionEvent {
    /// First entity, in admission order.
    pub a: Entity,
    /// Second entity.
    pub b: Entity,
}

impl Event for CollisionEvent {}
