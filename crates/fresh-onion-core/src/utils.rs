//! Path helpers.

pub mod paths;
