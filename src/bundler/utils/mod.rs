//! Shared helpers for the packaging phases.

pub mod fs;
