//! Foundation types for linsim.
//!
//! This crate holds what every other linsim crate shares: the error
//! taxonomy surfaced by filesystem, package and command operations, and the
//! TOML-backed configuration describing the simulated machine.

pub mod config;
pub mod error;
