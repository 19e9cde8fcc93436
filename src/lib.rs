//! Scroll reveals, typing text, stat counters, a floating-dots canvas and a
//! persisted light/dark toggle for the portfolio pages.
//!
//! The state machines and animation math build and test natively; the
//! `frontend` module binds them to the DOM on `wasm32`.

pub mod config;
pub mod counter;
pub mod dots;
pub mod error;
pub mod form;
pub mod nav;
pub mod reveal;
pub mod scroll;
pub mod theme;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
