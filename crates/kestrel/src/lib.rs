//! # Kestrel
//!
//! A small 2D top-down game built on [`kestrel_core`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        KESTREL                           │
//! ├──────────────────────────────────────────────────────────┤
//! │                                                          │
//! │  ┌────────────────┐        ┌──────────────────────────┐  │
//! │  │  Game          │───────>│  Systems                 │  │
//! │  │                │        │                          │  │
//! │  │  • Level       │        │  • Movement   • Camera   │  │
//! │  │  • Input       │        │  • Animation  • Render   │  │
//! │  │  • Frame loop  │        │  • Collision  • Damage   │  │
//! │  └───────┬────────┘        │  • Keyboard control      │  │
//! │          │                 └────────────┬─────────────┘  │
//! │          v                              v                │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  kestrel_core: Registry + EventBus<Registry>       │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `components`: Transform, sprite, collider and control data
//! - `events`: Key press and collision events
//! - `systems`: Per-frame policies over the registry
//! - `game`: Level loading and the frame driver
//! - `config`: TOML game configuration

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod systems;

pub use kestrel_core as ecs;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use events::{CollisionEvent, GameEventBus, KeyCode, KeyPressedEvent};
pub use game::{FrameStats, Game, LevelEntities};
