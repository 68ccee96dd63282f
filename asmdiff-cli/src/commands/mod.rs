//! Command implementations for asmdiff CLI

pub mod diff;
