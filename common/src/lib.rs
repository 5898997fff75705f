//! Types and logic shared by the residency backend and the browser client.
//!
//! Everything in here compiles for both the native server and `wasm32`, so it
//! stays free of I/O: data sources are reached through traits implemented by
//! the two sides.

pub mod model;
pub mod progress;
pub mod requests;
pub mod score;
pub mod session;
pub mod validation;
