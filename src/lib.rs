//! # contacto-client
//!
//! Leptos + WASM frontend for Contacto, a matching/networking app for
//! creative professionals. Replaces the original Next.js client with a
//! Rust-native UI layer.
//!
//! This crate contains pages, components, application state, the REST
//! helpers, and the STOMP chat client that drives the realtime chat rooms.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
