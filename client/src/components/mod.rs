//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome and the chat surface while reading/writing
//! shared state from Leptos context providers.

pub mod chat_launcher;
pub mod chat_thread;
pub mod footer;
pub mod navigation;
