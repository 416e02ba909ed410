//! Terminal client for Randomly, anonymous one-to-one stranger chat.

mod domain;
pub mod error;
mod formatter;
mod runner;
pub mod session;
mod ui;
pub mod view;

pub use runner::run_client;
