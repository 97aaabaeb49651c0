//! Core execution engine

pub mod parallel;
