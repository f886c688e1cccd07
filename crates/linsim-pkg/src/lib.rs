//! Simulated apt package catalog.
//!
//! The catalog is fixed at construction; the only runtime state is each
//! package's `installed` flag and the time of the last `update`. Every
//! operation returns the transcript apt would print.

mod catalog;
mod registry;

pub use catalog::default_catalog;
pub use registry::{Package, PackageRegistry};
