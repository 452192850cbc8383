//! Martingale — Monte Carlo simulation of the doubling strategy
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod strategy;
pub mod simulation;
