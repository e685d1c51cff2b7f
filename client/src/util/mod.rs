//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Scroll sampling, reveal coordination and the typing state machine are pure
//! and unit-tested here; pages only wire them to browser events and timers.

pub mod markdown;
pub mod motion;
pub mod radial_layout;
pub mod reveal;
pub mod rich_text;
pub mod scroll;
pub mod timers;
pub mod typewriter;
