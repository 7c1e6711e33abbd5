//! Shared types and models for the Production & Waste Control system
//!
//! This crate contains the domain records exchanged between the backend
//! and its collaborators (record store, UI), plus the pure helpers that
//! operate on them.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
