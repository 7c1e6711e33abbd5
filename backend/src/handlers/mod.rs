//! HTTP handlers for the Production & Waste Control API

mod admin;
mod alerts;
mod health;
mod lots;
mod stock;
mod waste;

pub use admin::*;
pub use alerts::*;
pub use health::*;
pub use lots::*;
pub use stock::*;
pub use waste::*;
