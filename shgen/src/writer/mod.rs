//! Shading-language writers.
//!
//! Writers render the intermediate representation of [`crate::ir`] to actual code.

pub mod cpp;
