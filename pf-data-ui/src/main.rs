//! Prefecture Population Checker
//!
//! Single-page population chart built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It loads the prefecture list once, lets the user pick
//! prefectures from a searchable multi-select, fetches each selected
//! prefecture's population series and draws them on a canvas.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
