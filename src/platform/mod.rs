//! Platform front ends
//!
//! The core never touches the DOM. On wasm32, `web` exposes the driver to a
//! JS renderer; native builds use the headless binary in `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;
