//! Signal Correlate shared types and errors.
//!
//! This crate provides the unified error type used across sc-core modules.
//! Numeric primitives live in `sc-stats`; this crate wraps their errors so
//! callers deal with a single `Result` alias.

pub mod error;

pub use error::{Error, Result};
