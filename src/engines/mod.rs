//! Low-level engines shared by the sequence modules

pub mod compute;
pub mod core;
