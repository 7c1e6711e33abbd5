//! Lot lifecycle and reconciliation services
//!
//! Each module pairs the pure computation (plain functions over
//! collections handed in by the caller) with a thin service struct that
//! orchestrates the record store around it.

pub mod alert;
pub mod expiry;
pub mod production;
pub mod remark;
pub mod stock;
pub mod waste;
