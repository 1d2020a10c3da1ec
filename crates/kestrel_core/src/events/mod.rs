//! # Events
//!
//! Synchronous typed publish/subscribe, independent of entity data.
//!
//! ## Design Philosophy
//!
//! - Dispatch happens inside `emit`, no queue, no buffering
//! - One event value per `emit`, shared by reference with every handler
//! - Handlers never see the bus, so they cannot change subscriptions
//!   while a dispatch is running

mod bus;

pub use bus::{Event, EventBus};
