//! Shared helpers.

pub mod validate;
