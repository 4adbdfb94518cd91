//! Route configuration modules.

pub mod realtime;
