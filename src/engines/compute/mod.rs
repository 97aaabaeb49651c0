//! Compute primitives for sequence operations
//!
//! This module provides the alphabet-agnostic building blocks used by the
//! sequence types in [`crate::modules`].

pub mod string_ops;
