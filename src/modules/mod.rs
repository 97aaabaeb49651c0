//! Biological sequence modules

pub mod io;
pub mod seq;
