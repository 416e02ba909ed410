//! Utilities shared by the Randomly server and client.

pub mod logger;
pub mod time;
