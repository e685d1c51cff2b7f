//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`chat`, `view`, `study`) so pages depend on
//! small focused models provided through Leptos context.

pub mod chat;
pub mod study;
pub mod view;
