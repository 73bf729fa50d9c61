//! Shared helpers.

pub mod process;
