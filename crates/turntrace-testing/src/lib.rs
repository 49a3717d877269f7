//! Test utilities for the turntrace workspace.

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
