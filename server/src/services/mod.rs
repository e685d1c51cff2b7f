//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own prompting and reply interpretation so route handlers
//! can stay focused on protocol translation, rate limiting, and status codes.
//! Services take `&dyn LlmChat` and never fail outward: every provider error
//! is logged and folded into a fallback value.

pub mod chat;
pub mod generate;
