//! # client
//!
//! Leptos + WASM frontend for the BidHub auction site.
//!
//! This crate contains pages, components, the mock auth session, and the
//! browser storage glue. The server binary renders it with the `ssr` feature;
//! the browser bundle is built with `hydrate`.

pub mod app;
pub mod components;
pub mod error;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
