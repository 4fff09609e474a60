//! Shared types and models for the Tranche Monitor
//!
//! This crate contains the subgraph entity models, address and amount types
//! shared between the backend server and the browser helpers (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
