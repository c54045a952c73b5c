//! Pieces shared by the `processing` engine and the `paysim` service:
//! configuration types with `!include`-aware YAML loading, and the test
//! helpers both crates' integration tests use.

pub mod config;
pub mod yaml_include;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{TestError, TestResult};
