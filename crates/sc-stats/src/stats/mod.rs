//! Core statistics modules.

pub mod descriptive;
pub mod rank;
