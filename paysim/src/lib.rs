//! PaySim fraud decision service.
//!
//! Turns a submitted transaction form into a model input row, asks the
//! classifier for a fraud probability, applies the reconciliation rule and
//! renders the verdict.

pub mod decision;
pub mod features;
pub mod rules;
pub mod transaction;
pub mod web;
