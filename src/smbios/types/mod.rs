//! Foundational data structures.

pub mod models;
