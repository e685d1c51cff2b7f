//! Page modules, one per [`crate::state::view::View`].
//!
//! ARCHITECTURE
//! ============
//! Each page owns its timers and listeners and delegates shared rendering
//! to `components`.

pub mod about;
pub mod chat;
pub mod flashcards;
pub mod home;
pub mod mind_map;
pub mod projects;
pub mod study;
