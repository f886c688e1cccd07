//! Platform services for linsim.
//!
//! The simulated system never reads the host clock directly. Everything
//! time-bearing (`date`, `uptime`, file timestamps, log lines) goes through
//! [`TimeService`], so tests can swap in a [`FixedTime`].

mod services;

pub use services::{DesktopTime, FixedTime, SystemTime, TimeService};
