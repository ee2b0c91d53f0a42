//! Rezzo rules engine library.
//!
//! Exposes the board representation, move generation, move resolution,
//! game and session state, and protocol modules for use by integration
//! tests and the binary entry points.

pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
pub mod session;
