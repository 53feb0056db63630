//! Python bindings (feature `pyo3`)
//!
//! Thin wrappers that validate arguments, raise Python exceptions instead
//! of panicking, and forward to the core generators and samplers.

pub mod generators;
