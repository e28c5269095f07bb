//! Core reusable components for alignment operations.

pub mod alignment;
pub mod io;
