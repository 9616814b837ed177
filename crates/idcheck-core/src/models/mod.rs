//! Data models shared across idcheck crates.

pub mod config;
pub mod identity;
pub mod wizard;
