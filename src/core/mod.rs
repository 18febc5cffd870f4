// src/core/mod.rs
//
// Pure building blocks shared by both extraction passes.

pub mod assemble;
pub mod associate;
pub mod classify;
pub mod dedup;
pub mod sanitize;

pub use classify::{Anchor, Classified, Fragment};
