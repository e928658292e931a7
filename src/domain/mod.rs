//! Domain model: reference data, the enrollment lifecycle and the pure
//! calculators. Nothing in here performs I/O beyond the storage ports.

pub mod catalog;
pub mod event;
pub mod formula;
pub mod money;
pub mod ports;
pub mod profile;
pub mod rewards;
pub mod user_benefit;
