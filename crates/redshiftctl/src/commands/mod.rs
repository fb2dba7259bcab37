//! Command implementations

pub mod profile;
pub mod redshift;
