// src/application/mod.rs
//
// Application layer - wiring and shared state

pub mod state;

pub use state::AppState;
