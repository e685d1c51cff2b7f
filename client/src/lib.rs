//! # client
//!
//! Leptos + WASM frontend for the Folio portfolio site.
//!
//! This crate contains pages, components, application state, network types,
//! and the animation core (scroll progress, reveal coordination, typewriter
//! sequencing). The `server` crate renders it with the `ssr` feature and
//! reuses `net::types` as its wire schema.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point invoked by the hydration script.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
