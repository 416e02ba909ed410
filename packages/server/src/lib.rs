//! Randomly matchmaking server library.
//!
//! Pairs anonymous visitors into one-to-one chat sessions over WebSocket:
//! visitors wait in a FIFO pool, are matched two at a time, exchange messages
//! with their partner and are told when the partner leaves.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
