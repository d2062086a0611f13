//! # StockCast Application Library
//!
//! The async, network-aware half of StockCast. The binary in `main.rs` is a
//! thin wrapper; integration tests drive the router through [`api`].

pub mod api;
pub mod cli;
pub mod config;
