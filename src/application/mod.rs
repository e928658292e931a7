//! Application layer orchestrating the domain over the storage ports.
//!
//! `Marketplace` drives the enrollment lifecycle and event log;
//! `RewardsService` resolves users and runs the rewards calculator.

pub mod marketplace;
pub mod rewards;
