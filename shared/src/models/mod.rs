//! Domain models for the Production & Waste Control system

mod alert;
mod lot;
mod waste;

pub use alert::*;
pub use lot::*;
pub use waste::*;
