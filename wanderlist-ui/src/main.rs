//! Wanderlist
//!
//! Browser front end for the travel places catalog, built with Leptos (WASM).
//!
//! # Routes
//!
//! - `/places` - places ranked against this session's clicks
//! - `/place/:id` - a single place
//! - `/settings` - ranking service address
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! The click history lives in memory for the lifetime of the page and is sent
//! to the ranking service with every catalog request.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
